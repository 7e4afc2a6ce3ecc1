//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use serde::{Deserialize, Serialize};
use storefront_core::Product;
use storefront_core::primitives::SUPPORTED_PAYMENT_METHOD;

use crate::resolver::{OrderPlacement, OrderRequest};
use crate::store::StoreHealth;

// =============================================================================
// ROOT & HEALTH
// =============================================================================

/// Static liveness message served at `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "E-Commerce Backend Running".to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// =============================================================================
// PRODUCTS
// =============================================================================

/// Query string of `GET /api/products`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub q: Option<String>,
}

/// Product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub items: Vec<Product>,
    /// Present only when the fallback catalog was served.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Product creation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductResponse {
    pub id: String,
}

// =============================================================================
// CART & WISHLIST
// =============================================================================

/// `POST /api/cart/add` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAddRequest {
    pub client_id: String,
    pub product_id: String,
    #[serde(default = "default_qty")]
    pub qty: u32,
}

const fn default_qty() -> u32 {
    1
}

/// `POST /api/wishlist/toggle` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistToggleRequest {
    pub client_id: String,
    pub product_id: String,
}

/// Acknowledgment without side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    pub message: String,
}

impl AckResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}

// =============================================================================
// CHECKOUT
// =============================================================================

/// `POST /api/checkout` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub client_id: String,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

fn default_payment_method() -> String {
    SUPPORTED_PAYMENT_METHOD.to_string()
}

impl From<CheckoutRequest> for OrderRequest {
    fn from(request: CheckoutRequest) -> Self {
        Self {
            client_id: request.client_id,
            payment_method: request.payment_method,
            total: request.total,
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
        }
    }
}

/// Checkout acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub ok: bool,
    pub order_id: String,
    pub status: String,
    pub payment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<OrderPlacement> for CheckoutResponse {
    fn from(placement: OrderPlacement) -> Self {
        Self {
            ok: true,
            order_id: placement.order_id,
            status: placement.status,
            payment: placement.payment.as_str().to_string(),
            note: placement.note.map(str::to_string),
        }
    }
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// `GET /test` snapshot: store health plus presence of store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    /// "Set" or "Not Set"; the value itself is never echoed.
    pub database_url: String,
    /// "Set" or "Not Set"; the value itself is never echoed.
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl DiagnosticsResponse {
    pub fn new(health: StoreHealth, url_set: bool, name_set: bool) -> Self {
        Self {
            backend: "Running".to_string(),
            database: health.status,
            database_url: presence(url_set),
            database_name: presence(name_set),
            connection_status: if health.connected {
                "Connected".to_string()
            } else {
                "Not Connected".to_string()
            },
            collections: health.collections,
        }
    }
}

fn presence(set: bool) -> String {
    if set { "Set" } else { "Not Set" }.to_string()
}
