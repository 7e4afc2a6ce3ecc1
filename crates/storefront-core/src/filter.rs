//! # Text Filter
//!
//! Case-insensitive substring matching over a product's title and description.
//!
//! The same predicate is used by the in-memory store and by the fallback
//! catalog, and is translated into an equivalent regex for MongoDB, so every
//! read path agrees on what a filter matches.

use crate::Product;

/// A non-empty search needle, kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter {
    raw: String,
    folded: String,
}

impl TextFilter {
    /// Build a filter from user input.
    ///
    /// Returns `None` for absent or empty input, which means "match
    /// everything". Whitespace is part of the needle.
    #[must_use]
    pub fn parse(input: Option<&str>) -> Option<Self> {
        let raw = input?;
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            folded: raw.to_lowercase(),
        })
    }

    /// The needle as the user typed it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `haystack` contains the needle, ignoring case.
    #[must_use]
    pub fn matches_text(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }

    /// Whether the product's title or description contains the needle.
    #[must_use]
    pub fn matches_product(&self, product: &Product) -> bool {
        self.matches_text(&product.title)
            || product
                .description
                .as_deref()
                .is_some_and(|d| self.matches_text(d))
    }

    /// The needle as a regex pattern with every metacharacter escaped.
    ///
    /// Used to push the filter down to stores that speak regex.
    #[must_use]
    pub fn escaped_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.raw.len());
        for c in self.raw.chars() {
            if matches!(
                c,
                '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
                    | '#' | '&' | '-' | '~'
            ) {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern
    }
}

/// Apply an optional filter to a product sequence, keeping order.
pub fn filter_products<'a, I>(products: I, filter: Option<&TextFilter>) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| filter.is_none_or(|f| f.matches_product(p)))
        .cloned()
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
