//! # storefront-core
//!
//! The domain model for Storefront - THE LOGIC.
//!
//! This crate holds everything about the catalog that does not need a network:
//! product and order types, the error taxonomy, document decoding, the text
//! filter shared by every read path, and the read-only fallback catalog.
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies (pure Rust)
//! - The fallback catalog is immutable and safe to share across threads
//! - Store implementations live in the binary; this crate only defines the
//!   document shapes they exchange

// =============================================================================
// MODULES
// =============================================================================

pub mod document;
pub mod fallback;
pub mod filter;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use document::{Document, DocumentFilter, decode_product};
pub use filter::TextFilter;
pub use types::{
    CartItem, CatalogSource, Order, PaymentMethod, Product, ProductInput, Sourced,
    StorefrontError, User,
};
