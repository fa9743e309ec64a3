//! # Wire Format
//!
//! Record shapes of the product API and their mapping to tienda-core types.
//!
//! ## Field Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Internal (Product / ProductDraft)        Remote record                │
//! │   ─────────────────────────────────        ─────────────                │
//! │   id            ◄──────────────────────►   id     (server-assigned)     │
//! │   name          ◄──────────────────────►   title                        │
//! │   description   ◄──────────────────────►   description                  │
//! │   price (Money) ◄──────────────────────►   price  (JSON number)         │
//! │   image         ◄──────────────────────►   image  (placeholder on write)│
//! │   —                          ──────────►   category (write only,        │
//! │                                                      default on write)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tienda_core::{Money, Product, ProductDraft, ProductId};

use crate::config::WriteDefaults;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Remote Records
// =============================================================================

/// A product as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Number,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body of a create or full-replace request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteProductBody {
    pub title: String,
    pub price: Number,
    pub description: String,
    pub category: String,
    pub image: String,
}

// =============================================================================
// Conversions
// =============================================================================

/// Remote record → internal product.
///
/// Fails when the price is negative or not a plain decimal.
impl TryFrom<RemoteProduct> for Product {
    type Error = CatalogError;

    fn try_from(record: RemoteProduct) -> Result<Self, Self::Error> {
        let price = price_from_number(&record.price).map_err(|reason| {
            CatalogError::Decode(format!("product {}: {}", record.id, reason))
        })?;

        Ok(Product {
            id: record.id,
            name: record.title,
            description: record.description,
            price,
            image: record.image,
        })
    }
}

impl RemoteProductBody {
    /// Draft → request body, filling in `category` and `image` defaults.
    pub fn from_draft(draft: &ProductDraft, defaults: &WriteDefaults) -> CatalogResult<Self> {
        Ok(RemoteProductBody {
            title: draft.name.clone(),
            price: price_to_number(draft.price)?,
            description: draft.description.clone(),
            category: draft
                .category
                .clone()
                .unwrap_or_else(|| defaults.category.clone()),
            image: draft.image.clone().unwrap_or_else(|| defaults.image.clone()),
        })
    }
}

/// Reads a JSON number as exact cents.
///
/// Integers are scaled directly. Other numbers go through their text form:
/// serde_json prints them in shortest round-trip form (`9.99`, not
/// `9.9900000001`), so parsing that text gives the amount the API meant.
/// Floats at or above 1e16 (and tiny ones) print in exponent form
/// (`1e16`); those carry no exact cents anyway and are rounded from `f64`.
fn price_from_number(number: &Number) -> Result<Money, String> {
    let price = if let Some(whole) = number.as_i64() {
        whole
            .checked_mul(100)
            .map(Money::from_cents)
            .ok_or_else(|| format!("price {} is too large", number))?
    } else {
        let text = number.to_string();
        if text.contains(|c| c == 'e' || c == 'E') {
            price_from_f64(number)?
        } else {
            text.parse().map_err(|e| format!("{}", e))?
        }
    };

    if price.is_negative() {
        return Err(format!("negative price {}", number));
    }
    Ok(price)
}

fn price_from_f64(number: &Number) -> Result<Money, String> {
    let cents = number
        .as_f64()
        .map(|major| (major * 100.0).round())
        .filter(|cents| cents.is_finite())
        .ok_or_else(|| format!("price {} is not a finite number", number))?;

    // i64::MAX as f64 rounds up to 2^63, so the bound is exclusive
    if cents >= i64::MAX as f64 || cents < i64::MIN as f64 {
        return Err(format!("price {} is too large", number));
    }
    Ok(Money::from_cents(cents as i64))
}

/// Writes cents as a JSON number in major units.
fn price_to_number(price: Money) -> CatalogResult<Number> {
    Number::from_f64(price.to_major_f64())
        .ok_or_else(|| CatalogError::Decode(format!("price {} is not a finite number", price)))
}
