//! # Fallback Catalog
//!
//! A fixed, read-only set of sample products served whenever the document
//! store cannot answer a read. It is built once and shared by every request;
//! nothing ever writes to it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::Product;
use crate::filter::{TextFilter, filter_products};

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        sample(
            "sample-1",
            "Glass Card Pro",
            "Minimalist translucent credit card with NFC.",
            129.0,
            "Fintech",
            "https://images.unsplash.com/photo-1556745753-b2904692b3cd?q=80&w=1200&auto=format&fit=crop",
            &[("material", "Polycarbonate"), ("connectivity", "NFC")],
        ),
        sample(
            "sample-2",
            "Neo Wallet",
            "Slim carbon fiber wallet for modern life.",
            79.0,
            "Accessories",
            "https://images.unsplash.com/photo-1526304640581-d334cdbbf45e?q=80&w=1200&auto=format&fit=crop",
            &[("material", "Carbon fiber"), ("capacity", "8 cards")],
        ),
        sample(
            "sample-3",
            "Arc Charger",
            "MagSafe fast charger with matte finish.",
            39.0,
            "Gadgets",
            "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?q=80&w=1200&auto=format&fit=crop",
            &[("output", "15W"), ("finish", "Matte")],
        ),
        sample(
            "sample-4",
            "Halo Earbuds",
            "True wireless earbuds with active noise cancelling.",
            149.0,
            "Audio",
            "https://images.unsplash.com/photo-1590658268037-6bf12165a8df?q=80&w=1200&auto=format&fit=crop",
            &[("battery", "30h with case"), ("anc", "Yes")],
        ),
    ]
});

fn sample(
    id: &str,
    title: &str,
    description: &str,
    price: f64,
    category: &str,
    image: &str,
    specs: &[(&str, &str)],
) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        price,
        category: category.to_string(),
        in_stock: true,
        image: Some(image.to_string()),
        gallery: Some(vec![image.to_string()]),
        specs: Some(
            specs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

/// The full fallback catalog in declaration order.
#[must_use]
pub fn catalog() -> &'static [Product] {
    &CATALOG
}

/// List fallback products matching `filter`, in declaration order, at most `limit`.
#[must_use]
pub fn list(filter: Option<&TextFilter>, limit: i64) -> Vec<Product> {
    let mut items = filter_products(catalog(), filter);
    items.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
    items
}

/// Find a fallback product by exact identifier.
#[must_use]
pub fn get(id: &str) -> Option<Product> {
    catalog().iter().find(|p| p.id == id).cloned()
}

// =============================================================================
// TESTS
// =============================================================================
