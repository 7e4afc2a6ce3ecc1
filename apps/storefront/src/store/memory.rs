//! # In-Memory Store
//!
//! Process-local collections with the same observable contract as MongoDB:
//! ObjectId-shaped identifiers, insertion order as natural order, and the
//! shared `DocumentFilter` semantics. Availability can be switched off to
//! exercise the fallback paths.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use storefront_core::document::ID_FIELD;
use storefront_core::{Document, DocumentFilter, StorefrontError};
use tokio::sync::RwLock;

use super::{DocumentStore, StoreHealth, is_object_id};

/// Name reported by health checks.
const DATABASE_NAME: &str = "memory";

/// In-memory document store.
#[derive(Debug)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
    next_id: AtomicU64,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate losing (or regaining) the connection.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Store a document exactly as given, bypassing id assignment.
    ///
    /// Lets tests plant documents that a well-behaved writer would never produce.
    pub async fn insert_raw(&self, collection: &str, document: Document) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn ensure_available(&self) -> Result<(), StorefrontError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorefrontError::StoreUnavailable)
        }
    }

    fn assign_id(&self) -> String {
        format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        is_object_id(id)
    }

    async fn create(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StorefrontError> {
        self.ensure_available()?;

        let id = self.assign_id();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        self.insert_raw(collection, document).await;

        tracing::debug!(collection, id = %id, "Inserted document");
        Ok(id)
    }

    async fn query(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<Document>, StorefrontError> {
        self.ensure_available()?;

        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter.matches(d))
                    .take(take)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn health_check(&self) -> StoreHealth {
        if self.ensure_available().is_err() {
            return StoreHealth::unavailable();
        }
        let names = self.collections.read().await.keys().cloned().collect();
        StoreHealth::working(DATABASE_NAME, names)
    }
}

// =============================================================================
// TESTS
// =============================================================================
