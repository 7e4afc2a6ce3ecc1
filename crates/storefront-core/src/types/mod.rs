//! # Core Type Definitions
//!
//! This module contains the domain types shared by every Storefront component:
//! - Catalog entries (`Product`, `ProductInput`)
//! - Checkout records (`CartItem`, `Order`, `PaymentMethod`)
//! - Customer records (`User`)
//! - Provenance wrappers (`CatalogSource`, `Sourced`)
//! - Error types (`StorefrontError`)
//!
//! ## Identifier Invariant
//!
//! Every `Product` handed to a caller carries a string `id`, whether it came
//! from the document store or from the fallback catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::primitives::{DEFAULT_ORDER_STATUS, MAX_USER_AGE, SUPPORTED_PAYMENT_METHOD};

// =============================================================================
// PRODUCT
// =============================================================================

/// A catalog entry as surfaced to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned (or sample) identifier. Never client supplied.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<BTreeMap<String, String>>,
}

const fn default_in_stock() -> bool {
    true
}

/// Product creation payload.
///
/// Identical to `Product` minus the identifier, which the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<BTreeMap<String, String>>,
}

impl ProductInput {
    /// Create an input with the required fields and defaults elsewhere.
    #[must_use]
    pub fn new(title: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            price,
            category: category.into(),
            in_stock: true,
            image: None,
            gallery: None,
            specs: None,
        }
    }

    /// Check the required fields before anything reaches the store.
    ///
    /// - `title` must be non-empty (ignoring surrounding whitespace)
    /// - `price` must be a finite number `>= 0`
    /// - `category` must be non-empty (ignoring surrounding whitespace)
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.title.trim().is_empty() {
            return Err(StorefrontError::ValidationError(
                "title must not be empty".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(StorefrontError::ValidationError(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        if self.category.trim().is_empty() {
            return Err(StorefrontError::ValidationError(
                "category must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Attach an identifier, producing the client-facing product.
    #[must_use]
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
            image: self.image,
            gallery: self.gallery,
            specs: self.specs,
        }
    }
}

// =============================================================================
// CART & ORDER
// =============================================================================

/// One line of a cart or order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    #[serde(default = "default_qty")]
    pub qty: u32,
}

const fn default_qty() -> u32 {
    1
}

/// Payment methods accepted at checkout. Cash on delivery is the only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Parse the wire literal. Anything but `"COD"` is rejected.
    pub fn parse(raw: &str) -> Result<Self, StorefrontError> {
        if raw == SUPPORTED_PAYMENT_METHOD {
            Ok(Self::CashOnDelivery)
        } else {
            Err(StorefrontError::ValidationError(format!(
                "Only {} is supported",
                SUPPORTED_PAYMENT_METHOD
            )))
        }
    }

    /// The wire literal for this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => SUPPORTED_PAYMENT_METHOD,
        }
    }
}

/// A placed order.
///
/// Items are not checked against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub client_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    #[serde(default = "default_order_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

fn default_order_status() -> String {
    DEFAULT_ORDER_STATUS.to_string()
}

impl Order {
    /// Create a freshly placed cash-on-delivery order with no line items.
    #[must_use]
    pub fn placed(client_id: impl Into<String>, total: f64) -> Self {
        Self {
            client_id: client_id.into(),
            items: Vec::new(),
            total,
            payment_method: PaymentMethod::CashOnDelivery,
            status: default_order_status(),
            name: None,
            email: None,
            phone: None,
            address: None,
        }
    }
}

// =============================================================================
// USER
// =============================================================================

/// Customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl User {
    pub fn validate(&self) -> Result<(), StorefrontError> {
        match self.age {
            Some(age) if age > MAX_USER_AGE => Err(StorefrontError::ValidationError(format!(
                "age must be at most {}, got {}",
                MAX_USER_AGE, age
            ))),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// PROVENANCE
// =============================================================================

/// Where a read result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// Live data from the document store.
    Store,
    /// The hardcoded fallback catalog.
    Fallback,
}

impl CatalogSource {
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback)
    }
}

/// A value tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: CatalogSource,
}

impl<T> Sourced<T> {
    #[must_use]
    pub const fn store(value: T) -> Self {
        Self {
            value,
            source: CatalogSource::Store,
        }
    }

    #[must_use]
    pub const fn fallback(value: T) -> Self {
        Self {
            value,
            source: CatalogSource::Fallback,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur within Storefront.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorefrontError {
    /// No connection to the document store exists.
    #[error("Document store unavailable")]
    StoreUnavailable,

    /// The store rejected a read.
    #[error("Query error: {0}")]
    QueryError(String),

    /// The store rejected a write.
    #[error("Write error: {0}")]
    WriteError(String),

    /// A stored document does not have the expected shape.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Client input failed validation.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Neither the store nor the fallback catalog holds the requested item.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl StorefrontError {
    /// Whether the error came from the store layer (and so may trigger fallback).
    #[must_use]
    pub const fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable
                | Self::QueryError(_)
                | Self::WriteError(_)
                | Self::MalformedDocument(_)
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
