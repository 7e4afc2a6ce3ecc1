//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use storefront::api::{
    CartAddRequest, CheckoutRequest, CheckoutResponse, DiagnosticsResponse, ErrorResponse,
    HealthResponse, ListQuery, ProductListResponse,
};
use storefront::store::StoreHealth;
use storefront_core::fallback;

// =============================================================================
// HEALTH & ERROR
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_error_response_shape() {
    let json = serde_json::to_string(&ErrorResponse::new("Product sample-9 not found")).unwrap();
    assert_eq!(json, r#"{"detail":"Product sample-9 not found"}"#);
}

// =============================================================================
// PRODUCT LISTING
// =============================================================================

#[test]
fn test_list_response_omits_missing_note() {
    let response = ProductListResponse {
        items: Vec::new(),
        note: None,
    };
    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(json, r#"{"items":[]}"#);
}

#[test]
fn test_list_response_fallback_shape() {
    let response = ProductListResponse {
        items: vec![fallback::get("sample-2").unwrap()],
        note: Some("database_unavailable_fallback".to_string()),
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["items"][0]["id"], "sample-2");
    assert_eq!(value["items"][0]["in_stock"], true);
    assert_eq!(value["note"], "database_unavailable_fallback");
}

#[test]
fn test_list_query_all_optional() {
    let query: ListQuery = serde_json::from_str("{}").unwrap();
    assert!(query.limit.is_none());
    assert!(query.q.is_none());
}

// =============================================================================
// CART & CHECKOUT
// =============================================================================

#[test]
fn test_cart_add_defaults_qty() {
    let request: CartAddRequest =
        serde_json::from_str(r#"{"client_id":"c1","product_id":"sample-1"}"#).unwrap();
    assert_eq!(request.qty, 1);
}

#[test]
fn test_checkout_request_defaults() {
    let request: CheckoutRequest = serde_json::from_str(r#"{"client_id":"c1"}"#).unwrap();
    assert_eq!(request.payment_method, "COD");
    assert_eq!(request.total, 0.0);
    assert!(request.address.is_none());
}

#[test]
fn test_checkout_response_omits_missing_note() {
    let response = CheckoutResponse {
        ok: true,
        order_id: "65f0a1b2c3d4e5f601234567".to_string(),
        status: "placed".to_string(),
        payment: "COD".to_string(),
        note: None,
    };
    let json = serde_json::to_string(&response).unwrap();
    assert!(!json.contains("note"));
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

#[test]
fn test_diagnostics_from_working_store() {
    let health = StoreHealth::working("shop", vec!["product".into(), "order".into()]);
    let diag = DiagnosticsResponse::new(health, true, true);
    assert_eq!(diag.database, "Connected & Working");
    assert_eq!(diag.connection_status, "Connected");
    assert_eq!(diag.collections, vec!["product", "order"]);
}

#[test]
fn test_diagnostics_degraded_store() {
    let health = StoreHealth::degraded("shop", "not authorized on shop");
    let diag = DiagnosticsResponse::new(health, true, false);
    assert!(diag.database.starts_with("Connected but Error: "));
    assert_eq!(diag.database_name, "Not Set");
}
