//! A store with no connection behind it.

use async_trait::async_trait;
use storefront_core::{Document, DocumentFilter, StorefrontError};

use super::{DocumentStore, StoreHealth, is_object_id};

/// Fails every operation with `StoreUnavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

#[async_trait]
impl DocumentStore for UnavailableStore {
    fn backend_name(&self) -> &'static str {
        "unavailable"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        is_object_id(id)
    }

    async fn create(
        &self,
        _collection: &str,
        _document: Document,
    ) -> Result<String, StorefrontError> {
        Err(StorefrontError::StoreUnavailable)
    }

    async fn query(
        &self,
        _collection: &str,
        _filter: &DocumentFilter,
        _limit: i64,
    ) -> Result<Vec<Document>, StorefrontError> {
        Err(StorefrontError::StoreUnavailable)
    }

    async fn health_check(&self) -> StoreHealth {
        StoreHealth::unavailable()
    }
}
