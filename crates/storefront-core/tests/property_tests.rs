//! # Property-Based Tests
//!
//! Filter and fallback invariants checked with proptest.

use proptest::prelude::*;
use storefront_core::document::{DocumentFilter, to_document};
use storefront_core::primitives::{MAX_LIST_LIMIT, SEARCHABLE_FIELDS, clamp_limit};
use storefront_core::{Product, TextFilter, fallback};

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn expected_ids(needle: &str) -> Vec<String> {
    fallback::catalog()
        .iter()
        .filter(|p| {
            contains_ignoring_case(&p.title, needle)
                || p.description
                    .as_deref()
                    .is_some_and(|d| contains_ignoring_case(d, needle))
        })
        .map(|p| p.id.clone())
        .collect()
}

fn ids(products: &[Product]) -> Vec<String> {
    products.iter().map(|p| p.id.clone()).collect()
}

/// Needles drawn partly from words that actually occur in the catalog so the
/// non-empty branch is exercised, partly random. Leading and trailing spaces
/// are common in both.
fn needle() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "wallet", "CARD", "glass", "Charger", "fiber", "nfc", "earbuds", "with", "o", "zzz",
            "pro ", " neo wallet ", "   ", " card",
        ])
        .prop_map(str::to_string),
        "[a-zA-Z ]{0,8}",
    ]
}

proptest! {
    /// The fallback listing is exactly the case-insensitive title/description subset.
    #[test]
    fn fallback_list_is_case_insensitive_subset(needle in needle()) {
        let filter = TextFilter::parse(Some(&needle));
        let listed = fallback::list(filter.as_ref(), MAX_LIST_LIMIT);

        if needle.is_empty() {
            prop_assert!(filter.is_none());
            prop_assert_eq!(listed.len(), fallback::catalog().len());
        } else {
            prop_assert_eq!(ids(&listed), expected_ids(&needle));
        }
    }

    /// The document predicate agrees with the product predicate on every sample.
    #[test]
    fn document_filter_agrees_with_product_filter(needle in needle()) {
        let Some(filter) = TextFilter::parse(Some(&needle)) else {
            return Ok(());
        };
        let doc_filter = DocumentFilter::text(filter.clone(), &SEARCHABLE_FIELDS);

        for product in fallback::catalog() {
            let document = to_document(product).expect("serialize");
            prop_assert_eq!(doc_filter.matches(&document), filter.matches_product(product));
        }
    }

    /// Clamped limits always fall in range.
    #[test]
    fn clamped_limit_in_range(requested in any::<i64>()) {
        let limit = clamp_limit(Some(requested));
        prop_assert!((1..=MAX_LIST_LIMIT).contains(&limit));
    }

    /// Fallback lookup by id is stable across calls.
    #[test]
    fn fallback_get_is_idempotent(idx in 0usize..6) {
        let id = format!("sample-{}", idx);
        prop_assert_eq!(fallback::get(&id), fallback::get(&id));
    }
}
