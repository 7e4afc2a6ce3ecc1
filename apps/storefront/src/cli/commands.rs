//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::Config;
use crate::resolver::CatalogResolver;
use crate::store::SharedStore;
use storefront_core::primitives::FALLBACK_NOTE;
use storefront_core::{Product, StorefrontError};

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn print_product_line(product: &Product) {
    println!(
        "{:<26} {:<24} {:>9.2}  {}{}",
        product.id,
        product.title,
        product.price,
        product.category,
        if product.in_stock { "" } else { " (out of stock)" }
    );
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(store: SharedStore, config: Config) -> Result<(), StorefrontError> {
    println!("Storefront Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.host);
    println!("  Port:     {}", config.port);
    println!("  Backend:  {}", store.backend_name());
    println!("  Checkout: {:?}", config.checkout_mode);
    println!();
    println!("Endpoints:");
    println!("  GET  /api/products       - List products");
    println!("  GET  /api/products/{{id}}  - Fetch a product");
    println!("  POST /api/products       - Create a product");
    println!("  POST /api/cart/add       - Add to cart");
    println!("  POST /api/wishlist/toggle - Toggle wishlist");
    println!("  POST /api/checkout       - Cash-on-delivery checkout");
    println!("  GET  /test               - Store diagnostics");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(store, config).await
}

// =============================================================================
// PRODUCTS COMMAND
// =============================================================================

/// List products through the resolver.
pub async fn cmd_products(
    store: SharedStore,
    json_mode: bool,
    query: Option<&str>,
    limit: Option<i64>,
) -> Result<(), StorefrontError> {
    let listing = CatalogResolver::new(store).list(query, limit).await;
    let fallback = listing.source.is_fallback();

    if json_mode {
        let mut output = serde_json::json!({ "items": listing.value });
        if fallback {
            output["note"] = FALLBACK_NOTE.into();
        }
        print_json(&output);
        return Ok(());
    }

    println!("Products ({})", listing.value.len());
    println!("========");
    if fallback {
        println!("Source: fallback catalog (document store unavailable)");
    }
    println!();
    for product in &listing.value {
        print_product_line(product);
    }

    Ok(())
}

// =============================================================================
// PRODUCT COMMAND
// =============================================================================

/// Show one product.
pub async fn cmd_product(
    store: SharedStore,
    json_mode: bool,
    id: &str,
) -> Result<(), StorefrontError> {
    let found = CatalogResolver::new(store).get_by_id(id).await?;
    let product = found.value;

    if json_mode {
        print_json(&serde_json::to_value(&product).unwrap_or_default());
        return Ok(());
    }

    println!("{}", product.title);
    println!("{}", "=".repeat(product.title.chars().count()));
    println!("Id:       {}", product.id);
    println!("Category: {}", product.category);
    println!("Price:    {:.2}", product.price);
    println!("In stock: {}", product.in_stock);
    if let Some(description) = &product.description {
        println!();
        println!("{}", description);
    }
    if let Some(specs) = &product.specs {
        println!();
        for (key, value) in specs {
            println!("  {:<14} {}", key, value);
        }
    }
    if found.source.is_fallback() {
        println!();
        println!("(served from the fallback catalog)");
    }

    Ok(())
}

// =============================================================================
// HEALTH COMMAND
// =============================================================================

/// Show store health.
pub async fn cmd_health(
    store: SharedStore,
    config: &Config,
    json_mode: bool,
) -> Result<(), StorefrontError> {
    let health = store.health_check().await;

    if json_mode {
        print_json(&serde_json::json!({
            "backend": store.backend_name(),
            "connected": health.connected,
            "status": health.status,
            "database_name": health.database_name,
            "collections": health.collections,
            "database_url_set": config.database_url.is_some(),
            "database_name_set": config.database_name.is_some(),
        }));
        return Ok(());
    }

    println!("Storefront Store Health");
    println!("=======================");
    println!("Backend:     {}", store.backend_name());
    println!("Status:      {}", health.status);
    println!("Connected:   {}", health.connected);
    if let Some(name) = &health.database_name {
        println!("Database:    {}", name);
    }
    println!("Collections: {}", health.collections.join(", "));

    Ok(())
}
