//! # Catalog Resolver
//!
//! Answers catalog reads from the document store and falls back to the
//! built-in sample catalog whenever the store cannot answer.
//!
//! ## Read paths (`list`, `get_by_id`)
//!
//! Any store failure (no connection, rejected query, malformed document)
//! switches to the fallback catalog with the same filter applied in process.
//! The only error a read can return is `NotFound`, when neither source has
//! the requested product.
//!
//! ## Write paths (`create`, `place_order`)
//!
//! Creation has nowhere to fall back to, so store errors propagate. Order
//! placement masks persistence failures in `CheckoutMode::Legacy` and
//! propagates them in `CheckoutMode::Strict`.

use storefront_core::primitives::{
    FALLBACK_NOTE, ORDER_COLLECTION, PRODUCT_COLLECTION, SAMPLE_ORDER_ID, SEARCHABLE_FIELDS,
    clamp_limit,
};
use storefront_core::{
    DocumentFilter, Order, PaymentMethod, Product, ProductInput, Sourced, StorefrontError,
    TextFilter, decode_product, document::to_document, fallback,
};

use crate::config::CheckoutMode;
use crate::store::SharedStore;

// =============================================================================
// ORDER TYPES
// =============================================================================

/// What the caller supplied at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub client_id: String,
    pub payment_method: String,
    pub total: f64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Result of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlacement {
    pub order_id: String,
    pub status: String,
    pub payment: PaymentMethod,
    /// Set when the order was acknowledged without being stored.
    pub note: Option<&'static str>,
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Dual-source catalog access over an injected store.
#[derive(Debug, Clone)]
pub struct CatalogResolver {
    store: SharedStore,
}

impl CatalogResolver {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// List products whose title or description contains `filter_text`.
    ///
    /// Store results keep the store's natural order; fallback results keep
    /// declaration order.
    pub async fn list(
        &self,
        filter_text: Option<&str>,
        limit: Option<i64>,
    ) -> Sourced<Vec<Product>> {
        let limit = clamp_limit(limit);
        let text = TextFilter::parse(filter_text);
        let filter = match &text {
            Some(t) => DocumentFilter::text(t.clone(), &SEARCHABLE_FIELDS),
            None => DocumentFilter::All,
        };

        match self.fetch_products(&filter, limit).await {
            Ok(items) => Sourced::store(items),
            Err(e) => {
                tracing::warn!(
                    event = "catalog_fallback",
                    operation = "list",
                    error = %e,
                    "Serving fallback catalog"
                );
                Sourced::fallback(fallback::list(text.as_ref(), limit))
            }
        }
    }

    /// Look up one product.
    ///
    /// Ids that are not in the store's format skip the store and go straight
    /// to the fallback catalog; they are never reported as invalid.
    pub async fn get_by_id(&self, id: &str) -> Result<Sourced<Product>, StorefrontError> {
        if self.store.is_valid_id(id) {
            match self
                .fetch_products(&DocumentFilter::IdEquals(id.to_string()), 1)
                .await
            {
                Ok(mut found) if !found.is_empty() => return Ok(Sourced::store(found.remove(0))),
                Ok(_) => tracing::debug!(id, "Product not in store, trying fallback catalog"),
                Err(e) => tracing::warn!(
                    event = "catalog_fallback",
                    operation = "get_by_id",
                    error = %e,
                    "Store lookup failed, trying fallback catalog"
                ),
            }
        }

        fallback::get(id)
            .map(Sourced::fallback)
            .ok_or_else(|| StorefrontError::NotFound(format!("Product {} not found", id)))
    }

    /// Validate and store a new product, returning its identifier.
    pub async fn create(&self, input: ProductInput) -> Result<String, StorefrontError> {
        input.validate()?;
        let document = to_document(&input)?;
        let id = self.store.create(PRODUCT_COLLECTION, document).await?;
        tracing::info!(id = %id, title = %input.title, "Product created");
        Ok(id)
    }

    /// Place a cash-on-delivery order.
    ///
    /// The order carries no line items: cart contents are not threaded into
    /// checkout.
    pub async fn place_order(
        &self,
        request: OrderRequest,
        mode: CheckoutMode,
    ) -> Result<OrderPlacement, StorefrontError> {
        let payment = PaymentMethod::parse(&request.payment_method)?;
        if !request.total.is_finite() || request.total < 0.0 {
            return Err(StorefrontError::ValidationError(
                "total must be a non-negative number".to_string(),
            ));
        }

        let mut order = Order::placed(request.client_id, request.total);
        order.name = request.name;
        order.email = request.email;
        order.phone = request.phone;
        order.address = request.address;
        let status = order.status.clone();

        let persisted = match to_document(&order) {
            Ok(document) => self.store.create(ORDER_COLLECTION, document).await,
            Err(e) => Err(e),
        };

        match (persisted, mode) {
            (Ok(order_id), _) => {
                tracing::info!(order_id = %order_id, "Order placed");
                Ok(OrderPlacement {
                    order_id,
                    status,
                    payment,
                    note: None,
                })
            }
            (Err(e), CheckoutMode::Legacy) => {
                tracing::warn!(
                    event = "checkout_masked_failure",
                    error = %e,
                    "Order not persisted, acknowledging with placeholder id"
                );
                Ok(OrderPlacement {
                    order_id: SAMPLE_ORDER_ID.to_string(),
                    status,
                    payment,
                    note: Some(FALLBACK_NOTE),
                })
            }
            (Err(e), CheckoutMode::Strict) => {
                tracing::error!(error = %e, "Order not persisted");
                Err(e)
            }
        }
    }

    async fn fetch_products(
        &self,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<Product>, StorefrontError> {
        self.store
            .query(PRODUCT_COLLECTION, filter, limit)
            .await?
            .into_iter()
            .map(decode_product)
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore, MemoryStore, UnavailableStore};
    use serde_json::json;
    use std::sync::Arc;
    use storefront_core::CatalogSource;

    fn memory() -> (Arc<MemoryStore>, CatalogResolver) {
        let store = Arc::new(MemoryStore::new());
        let resolver = CatalogResolver::new(store.clone());
        (store, resolver)
    }

    fn offline() -> CatalogResolver {
        CatalogResolver::new(Arc::new(UnavailableStore))
    }

    fn order_request(method: &str) -> OrderRequest {
        OrderRequest {
            client_id: "client-1".into(),
            payment_method: method.into(),
            total: 0.0,
            name: Some("Ada".into()),
            email: None,
            phone: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn list_falls_back_when_store_unavailable() {
        let listing = offline().list(Some("wallet"), None).await;
        assert_eq!(listing.source, CatalogSource::Fallback);
        assert_eq!(listing.value.len(), 1);
        assert_eq!(listing.value[0].id, "sample-2");
    }

    #[tokio::test]
    async fn list_uses_store_when_available() {
        let (_store, resolver) = memory();
        resolver
            .create(ProductInput::new("Desk Lamp", 20.0, "Home"))
            .await
            .expect("create");

        let listing = resolver.list(None, None).await;
        assert_eq!(listing.source, CatalogSource::Store);
        assert_eq!(listing.value.len(), 1);
        assert_eq!(listing.value[0].title, "Desk Lamp");
    }

    #[tokio::test]
    async fn empty_store_is_not_a_fallback() {
        let (_store, resolver) = memory();
        let listing = resolver.list(None, None).await;
        assert_eq!(listing.source, CatalogSource::Store);
        assert!(listing.value.is_empty());
    }

    #[tokio::test]
    async fn malformed_document_triggers_fallback() {
        let (store, resolver) = memory();
        let bad = json!({"id": "65f0a1b2c3d4e5f601234567", "title": "No price"});
        if let serde_json::Value::Object(map) = bad {
            store.insert_raw(PRODUCT_COLLECTION, map).await;
        }

        let listing = resolver.list(None, None).await;
        assert_eq!(listing.source, CatalogSource::Fallback);
        assert_eq!(listing.value.len(), 4);
    }

    #[tokio::test]
    async fn get_by_id_round_trips_created_product() {
        let (_store, resolver) = memory();
        let mut input = ProductInput::new("Desk Lamp", 20.0, "Home");
        input.description = Some("Warm light".into());
        let id = resolver.create(input.clone()).await.expect("create");

        let found = resolver.get_by_id(&id).await.expect("found");
        assert_eq!(found.source, CatalogSource::Store);
        assert_eq!(found.value, input.into_product(id));
    }

    #[tokio::test]
    async fn get_by_id_sample_id_skips_store() {
        let (_store, resolver) = memory();
        let found = resolver.get_by_id("sample-1").await.expect("found");
        assert_eq!(found.source, CatalogSource::Fallback);
        assert_eq!(found.value.title, "Glass Card Pro");
    }

    #[tokio::test]
    async fn get_by_id_misses_both_sources() {
        let err = offline().get_by_id("sample-99").await.expect_err("missing");
        assert!(matches!(err, StorefrontError::NotFound(_)));

        let (_store, resolver) = memory();
        let err = resolver
            .get_by_id("65f0a1b2c3d4e5f601234567")
            .await
            .expect_err("missing");
        assert!(matches!(err, StorefrontError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_by_id_is_idempotent() {
        let resolver = offline();
        let a = resolver.get_by_id("sample-3").await.expect("a");
        let b = resolver.get_by_id("sample-3").await.expect("b");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_before_store() {
        let (store, resolver) = memory();
        let err = resolver
            .create(ProductInput::new("", 5.0, "Home"))
            .await
            .expect_err("invalid");
        assert!(matches!(err, StorefrontError::ValidationError(_)));
        assert_eq!(store.count(PRODUCT_COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn create_propagates_store_failure() {
        let err = offline()
            .create(ProductInput::new("Lamp", 5.0, "Home"))
            .await
            .expect_err("unavailable");
        assert_eq!(err, StorefrontError::StoreUnavailable);
        assert_eq!(fallback::catalog().len(), 4);
    }

    #[tokio::test]
    async fn checkout_rejects_other_payment_methods() {
        let (store, resolver) = memory();
        let err = resolver
            .place_order(order_request("Card"), CheckoutMode::Legacy)
            .await
            .expect_err("card");
        assert!(matches!(err, StorefrontError::ValidationError(_)));
        assert_eq!(store.count(ORDER_COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn checkout_persists_order_without_items() {
        let (store, resolver) = memory();
        let placement = resolver
            .place_order(order_request("COD"), CheckoutMode::Strict)
            .await
            .expect("placed");
        assert_ne!(placement.order_id, SAMPLE_ORDER_ID);
        assert_eq!(placement.status, "placed");
        assert!(placement.note.is_none());

        let stored = store
            .query(ORDER_COLLECTION, &DocumentFilter::IdEquals(placement.order_id), 1)
            .await
            .expect("query");
        assert_eq!(stored[0]["items"], json!([]));
        assert_eq!(stored[0]["payment_method"], json!("COD"));
    }

    #[tokio::test]
    async fn legacy_checkout_masks_store_failure() {
        let placement = offline()
            .place_order(order_request("COD"), CheckoutMode::Legacy)
            .await
            .expect("masked");
        assert_eq!(placement.order_id, SAMPLE_ORDER_ID);
        assert_eq!(placement.note, Some(FALLBACK_NOTE));
    }

    #[tokio::test]
    async fn strict_checkout_propagates_store_failure() {
        let err = offline()
            .place_order(order_request("COD"), CheckoutMode::Strict)
            .await
            .expect_err("strict");
        assert_eq!(err, StorefrontError::StoreUnavailable);
    }
}
