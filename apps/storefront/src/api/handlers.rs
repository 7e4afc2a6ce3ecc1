//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        AckResponse, CartAddRequest, CheckoutRequest, CheckoutResponse, CreateProductResponse,
        DiagnosticsResponse, ErrorResponse, HealthResponse, ListQuery, ProductListResponse,
        RootResponse, WishlistToggleRequest,
    },
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storefront_core::primitives::FALLBACK_NOTE;
use storefront_core::{ProductInput, StorefrontError};


/// Map an error onto a status code and `{ detail }` body.
fn error_response(error: &StorefrontError) -> Response {
    let status = match error {
        StorefrontError::NotFound(_) => StatusCode::NOT_FOUND,
        StorefrontError::ValidationError(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if error.is_store_error() {
        tracing::error!(error = %error, "Store error reached the client");
    }
    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}

/// Wrap an extractor rejection in the same `{ detail }` body, keeping its status.
fn invalid_json(rejection: &JsonRejection) -> Response {
    (rejection.status(), Json(ErrorResponse::new(rejection.body_text()))).into_response()
}

fn invalid_query(rejection: &QueryRejection) -> Response {
    (rejection.status(), Json(ErrorResponse::new(rejection.body_text()))).into_response()
}

// =============================================================================
// ROOT & HEALTH HANDLERS
// =============================================================================

/// Static liveness message.
pub async fn root_handler() -> impl IntoResponse {
    Json(RootResponse::default())
}

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Store diagnostics.
pub async fn diagnostics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.resolver.store().health_check().await;
    let response = DiagnosticsResponse::new(
        health,
        state.config.database_url.is_some(),
        state.config.database_name.is_some(),
    );
    (StatusCode::OK, Json(response))
}

// =============================================================================
// PRODUCT HANDLERS
// =============================================================================

/// List products, optionally filtered by `q`.
pub async fn list_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return invalid_query(&rejection),
    };
    let listing = state.resolver.list(query.q.as_deref(), query.limit).await;

    let response = ProductListResponse {
        items: listing.value,
        note: listing
            .source
            .is_fallback()
            .then(|| FALLBACK_NOTE.to_string()),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Fetch one product.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.resolver.get_by_id(&id).await {
        Ok(found) => {
            tracing::debug!(id = %id, source = ?found.source, "Product resolved");
            (StatusCode::OK, Json(found.value)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Create a product.
pub async fn create_product_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return invalid_json(&rejection),
    };
    match state.resolver.create(input).await {
        Ok(id) => (StatusCode::CREATED, Json(CreateProductResponse { id })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Product creation failed");
            error_response(&e)
        }
    }
}

// =============================================================================
// CART & WISHLIST HANDLERS
// =============================================================================

/// Acknowledge a cart addition. Nothing is stored.
pub async fn cart_add_handler(
    payload: Result<Json<CartAddRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_json(&rejection),
    };
    tracing::debug!(
        client_id = %request.client_id,
        product_id = %request.product_id,
        qty = request.qty,
        "Cart add acknowledged"
    );
    Json(AckResponse::ok("Added to cart")).into_response()
}

/// Acknowledge a wishlist toggle. Nothing is stored.
pub async fn wishlist_toggle_handler(
    payload: Result<Json<WishlistToggleRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_json(&rejection),
    };
    tracing::debug!(
        client_id = %request.client_id,
        product_id = %request.product_id,
        "Wishlist toggle acknowledged"
    );
    Json(AckResponse::ok("Wishlist updated")).into_response()
}

// =============================================================================
// CHECKOUT HANDLER
// =============================================================================

/// Place a cash-on-delivery order.
pub async fn checkout_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_json(&rejection),
    };
    match state
        .resolver
        .place_order(request.into(), state.config.checkout_mode)
        .await
    {
        Ok(placement) => (StatusCode::OK, Json(CheckoutResponse::from(placement))).into_response(),
        Err(e) => error_response(&e),
    }
}
