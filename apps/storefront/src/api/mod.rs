//! # Storefront HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Liveness message
//! - `GET /health` - Health check
//! - `GET /test` - Store diagnostics
//! - `GET /api/products` - List products (`limit`, `q`)
//! - `GET /api/products/{id}` - Fetch one product
//! - `POST /api/products` - Create a product
//! - `POST /api/cart/add` - Acknowledge a cart addition
//! - `POST /api/wishlist/toggle` - Acknowledge a wishlist toggle
//! - `POST /api/checkout` - Place a cash-on-delivery order
//!
//! ## Configuration
//!
//! - `STOREFRONT_CORS_ORIGINS`: comma-separated origins, or "*" (default: all)
//! - `STOREFRONT_RATE_LIMIT`: requests per second (default: 0, disabled)

mod handlers;
mod middleware;
mod types;

pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    AckResponse, CartAddRequest, CheckoutRequest, CheckoutResponse, CreateProductResponse,
    DiagnosticsResponse, ErrorResponse, HealthResponse, ListQuery, ProductListResponse,
    RootResponse, WishlistToggleRequest,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use storefront_core::StorefrontError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::resolver::CatalogResolver;
use crate::store::SharedStore;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the resolver over the injected store, and the
/// startup configuration.
#[derive(Clone)]
pub struct AppState {
    pub resolver: CatalogResolver,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create app state around an already opened store.
    #[must_use]
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self {
            resolver: CatalogResolver::new(store),
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer.
///
/// - unset or "*": any origin
/// - otherwise: the comma-separated list; invalid entries are skipped, and
///   an empty result falls back to any origin
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match origins.map(str::trim) {
        None | Some("*") => base.allow_origin(Any),
        Some(list) => {
            let allowed: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!("CORS: No valid origins configured, allowing any origin");
                base.allow_origin(Any)
            } else {
                base.allow_origin(allowed)
            }
        }
    }
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - global quota (if enabled)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(state.config.cors_origins.as_deref());

    let rate_limiter = create_rate_limiter(state.config.rate_limit);
    match &rate_limiter {
        Some(_) => tracing::info!(
            "Rate limiting enabled: {} requests/second",
            state.config.rate_limit
        ),
        None => tracing::info!("Rate limiting disabled"),
    }

    let mut router = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/test", get(handlers::diagnostics_handler))
        .route(
            "/api/products",
            get(handlers::list_products_handler).post(handlers::create_product_handler),
        )
        .route("/api/products/{id}", get(handlers::get_product_handler))
        .route("/api/cart/add", post(handlers::cart_add_handler))
        .route("/api/wishlist/toggle", post(handlers::wishlist_toggle_handler))
        .route("/api/checkout", post(handlers::checkout_handler));

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(store: SharedStore, config: Config) -> Result<(), StorefrontError> {
    let addr = config.bind_address();
    let router = create_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StorefrontError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Storefront HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StorefrontError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down");
}

// =============================================================================
// TESTS
// =============================================================================
