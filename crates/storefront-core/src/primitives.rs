//! # Primitives
//!
//! Fixed limits and wire literals shared by the core and the binary.

/// Collection holding catalog products.
pub const PRODUCT_COLLECTION: &str = "product";

/// Collection holding placed orders.
pub const ORDER_COLLECTION: &str = "order";

/// Listing size when the caller gives none.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Upper bound on a single listing.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Maximum number of collection names reported by a health check.
pub const MAX_HEALTH_COLLECTIONS: usize = 10;

/// Maximum length of an error excerpt embedded in a health status string.
pub const MAX_HEALTH_ERROR_CHARS: usize = 80;

/// Fields searched by a listing filter.
pub const SEARCHABLE_FIELDS: [&str; 2] = ["title", "description"];

/// Provenance marker attached to responses served from the fallback catalog.
pub const FALLBACK_NOTE: &str = "database_unavailable_fallback";

/// The only accepted payment method literal.
pub const SUPPORTED_PAYMENT_METHOD: &str = "COD";

/// Status given to every new order.
pub const DEFAULT_ORDER_STATUS: &str = "placed";

/// Order id returned when an order could not be persisted (legacy checkout).
pub const SAMPLE_ORDER_ID: &str = "sample-order";

/// Maximum accepted customer age.
pub const MAX_USER_AGE: u8 = 120;

/// Clamp a requested listing size into `1..=MAX_LIST_LIMIT`.
///
/// `None` yields `DEFAULT_LIST_LIMIT`.
#[must_use]
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_defaults() {
        assert_eq!(clamp_limit(None), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-7)), 1);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(10_000)), MAX_LIST_LIMIT);
    }
}
