//! # Domain Types
//!
//! The product shape the application works with, independent of how the
//! remote API spells its fields.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductDraft   │   │   ProductId     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  name           │   │  Number(u64)    │       │
//! │  │  name           │   │  description    │   │  Text(String)   │       │
//! │  │  description    │   │  price          │   └─────────────────┘       │
//! │  │  price (Money)  │   │  image?         │                             │
//! │  │  image?         │   │  category?      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │   read side              write side                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Identifier assigned by the product source.
///
/// The API hands out integers today, but nothing in the application relies
/// on that, so string identifiers are accepted and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

/// Digits become `Number`, anything else stays `Text`.
impl FromStr for ProductId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<u64>() {
            Ok(n) => ProductId::Number(n),
            Err(_) => ProductId::Text(s.to_string()),
        })
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId::Text(s)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as shown in the catalog and stored in cart lines.
///
/// Not owned by the application: the remote API is the source of truth and
/// a `Product` is never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Display name (`title` on the wire).
    pub name: String,

    pub description: String,

    /// Unit price, never negative.
    pub price: Money,

    /// Image URL, if the source has one.
    pub image: Option<String>,
}

impl Product {
    /// Returns the description cut to `max_chars` characters with `...`
    /// appended, or the full description when it already fits.
    ///
    /// ```rust
    /// use tienda_core::{Money, Product, ProductId};
    ///
    /// let product = Product {
    ///     id: ProductId::from(1),
    ///     name: "Mug".to_string(),
    ///     description: "Large ceramic mug".to_string(),
    ///     price: Money::from_cents(800),
    ///     image: None,
    /// };
    /// assert_eq!(product.short_description(5), "Large...");
    /// assert_eq!(product.short_description(100), "Large ceramic mug");
    /// ```
    pub fn short_description(&self, max_chars: usize) -> Cow<'_, str> {
        match self.description.char_indices().nth(max_chars) {
            Some((cut, _)) => Cow::Owned(format!("{}...", &self.description[..cut])),
            None => Cow::Borrowed(&self.description),
        }
    }

    /// Whether the description is long enough to need a "show more" toggle.
    pub fn has_long_description(&self, max_chars: usize) -> bool {
        self.description.chars().count() > max_chars
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Input for creating or fully replacing a product.
///
/// `image` and `category` are optional here; the catalog adapter fills in
/// its configured defaults when they are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: Option<String>,
    pub category: Option<String>,
}

/// Starting point for an edit: the current values of an existing product.
///
/// The category is unknown on the read side, so it is left unset.
impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        ProductDraft {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            category: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
