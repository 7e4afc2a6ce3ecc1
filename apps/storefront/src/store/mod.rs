//! # Document Store Adapter
//!
//! The seam between the catalog and the external document database.
//!
//! ## Backends
//!
//! - [`MongoStore`]: MongoDB via the official driver
//! - [`MemoryStore`]: in-process collections (tests, `--backend memory`)
//! - [`UnavailableStore`]: used when no connection is configured; every
//!   operation fails with `StoreUnavailable`
//!
//! Every backend returns documents with a string `id` field and never exposes
//! its native key. No backend caches, retries or adds timeouts of its own.

mod memory;
mod mongo;
mod unavailable;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use unavailable::UnavailableStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_core::primitives::{MAX_HEALTH_COLLECTIONS, MAX_HEALTH_ERROR_CHARS};
use storefront_core::{Document, DocumentFilter, StorefrontError};

use crate::config::Config;

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Create/read access to named collections.
#[async_trait]
pub trait DocumentStore: std::fmt::Debug + Send + Sync {
    /// Short backend name for logs and diagnostics.
    fn backend_name(&self) -> &'static str;

    /// Whether `id` has the shape of an identifier this store can assign.
    fn is_valid_id(&self, id: &str) -> bool;

    /// Insert a document and return its new identifier.
    ///
    /// Any `id` field in `document` is discarded; identifiers are always
    /// assigned by the store.
    async fn create(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<String, StorefrontError>;

    /// Return at most `limit` documents matching `filter`, in the store's
    /// natural order.
    async fn query(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<Document>, StorefrontError>;

    /// Report connectivity. Never fails.
    async fn health_check(&self) -> StoreHealth;
}

/// Shared store handle injected into the resolver and router.
pub type SharedStore = Arc<dyn DocumentStore>;

// =============================================================================
// HEALTH
// =============================================================================

/// Connectivity snapshot of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHealth {
    pub connected: bool,
    pub database_name: Option<String>,
    /// At most `MAX_HEALTH_COLLECTIONS` names.
    pub collections: Vec<String>,
    /// Human readable status line.
    pub status: String,
}

impl StoreHealth {
    /// Connected and able to list collections.
    #[must_use]
    pub fn working(database_name: impl Into<String>, mut collections: Vec<String>) -> Self {
        collections.truncate(MAX_HEALTH_COLLECTIONS);
        Self {
            connected: true,
            database_name: Some(database_name.into()),
            collections,
            status: "Connected & Working".to_string(),
        }
    }

    /// Connected, but listing collections failed.
    #[must_use]
    pub fn degraded(database_name: impl Into<String>, error: &str) -> Self {
        let excerpt: String = error.chars().take(MAX_HEALTH_ERROR_CHARS).collect();
        Self {
            connected: true,
            database_name: Some(database_name.into()),
            collections: Vec::new(),
            status: format!("Connected but Error: {}", excerpt),
        }
    }

    /// No connection at all.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            connected: false,
            database_name: None,
            collections: Vec::new(),
            status: "Not Available".to_string(),
        }
    }
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Whether `id` is a 24-character hexadecimal ObjectId string.
#[must_use]
pub fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

// =============================================================================
// BACKEND SELECTION
// =============================================================================

/// Store backends selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Mongo,
    Memory,
}

impl std::str::FromStr for Backend {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            other => Err(StorefrontError::ConfigError(format!(
                "unknown backend '{}', expected 'mongo' or 'memory'",
                other
            ))),
        }
    }
}

/// Build the process-wide store handle.
///
/// A missing or unusable MongoDB configuration is not fatal: the server still
/// starts and serves the fallback catalog.
pub async fn open_store(backend: Backend, config: &Config) -> SharedStore {
    match backend {
        Backend::Memory => {
            tracing::info!("Using in-memory document store");
            Arc::new(MemoryStore::new())
        }
        Backend::Mongo => match (&config.database_url, &config.database_name) {
            (Some(url), Some(name)) => match MongoStore::connect(url, name).await {
                Ok(store) => {
                    tracing::info!(database = %name, "MongoDB client initialized");
                    Arc::new(store)
                }
                Err(e) => {
                    tracing::warn!("MongoDB client could not be created: {}", e);
                    Arc::new(UnavailableStore)
                }
            },
            _ => {
                tracing::warn!(
                    "DATABASE_URL or DATABASE_NAME not set; serving the fallback catalog only"
                );
                Arc::new(UnavailableStore)
            }
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================
