//! # Documents
//!
//! Store-agnostic document shapes exchanged with the document store adapter.
//!
//! A `Document` is a JSON object. Documents returned by a store always carry
//! their identifier as a string `id` field; the store-native key (`_id` for
//! MongoDB) never leaves the adapter.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::filter::TextFilter;
use crate::{Product, StorefrontError};

/// A schemaless record as stored in a collection.
pub type Document = Map<String, Value>;

/// Name of the normalized identifier field.
pub const ID_FIELD: &str = "id";

/// Typed query predicate understood by every store implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFilter {
    /// Match every document.
    All,
    /// Match the document whose identifier equals the given string.
    IdEquals(String),
    /// Match documents where any of `fields` contains the needle, ignoring case.
    TextContains {
        filter: TextFilter,
        fields: Vec<String>,
    },
}

impl DocumentFilter {
    /// Substring filter over the given fields.
    #[must_use]
    pub fn text(filter: TextFilter, fields: &[&str]) -> Self {
        Self::TextContains {
            filter,
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    /// Evaluate the predicate against a normalized document.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Self::All => true,
            Self::IdEquals(id) => {
                document.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str())
            }
            Self::TextContains { filter, fields } => fields.iter().any(|field| {
                document
                    .get(field)
                    .and_then(Value::as_str)
                    .is_some_and(|text| filter.matches_text(text))
            }),
        }
    }
}

/// Serialize a value into a document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StorefrontError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StorefrontError::MalformedDocument(format!(
            "expected an object, got {}",
            other
        ))),
        Err(e) => Err(StorefrontError::MalformedDocument(e.to_string())),
    }
}

/// Deserialize a document into a typed record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StorefrontError> {
    serde_json::from_value(Value::Object(document))
        .map_err(|e| StorefrontError::MalformedDocument(e.to_string()))
}

/// Decode a stored product, rejecting documents with missing or ill-typed fields.
pub fn decode_product(document: Document) -> Result<Product, StorefrontError> {
    let id = document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StorefrontError::MalformedDocument("missing string id".to_string()))?;

    let product: Product = from_document(document)
        .map_err(|e| StorefrontError::MalformedDocument(format!("product {}: {}", id, e)))?;

    if !product.price.is_finite() || product.price < 0.0 {
        return Err(StorefrontError::MalformedDocument(format!(
            "product {}: negative or non-finite price",
            id
        )));
    }
    Ok(product)
}

// =============================================================================
// TESTS
// =============================================================================
