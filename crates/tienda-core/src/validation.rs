//! # Validation Module
//!
//! Input validation for the admin product form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input (text fields, as typed)                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── required fields, lengths                                          │
//! │  └── price text → Money                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote API (whatever it chooses to reject)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tienda_core::validation::ProductForm;
//!
//! let form = ProductForm {
//!     name: "Shirt".to_string(),
//!     description: "Cotton shirt".to_string(),
//!     price: "9.99".to_string(),
//!     ..Default::default()
//! };
//! let draft = form.into_draft().unwrap();
//! assert_eq!(draft.price.cents(), 999);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductDraft};
use crate::{MAX_DESCRIPTION_CHARS, MAX_PRODUCT_NAME_CHARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ```rust
/// use tienda_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Backpack").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_PRODUCT_NAME_CHARS)
}

/// Validates a product description.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 5000 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    validate_text("description", description, MAX_DESCRIPTION_CHARS)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Parses the price field of the form.
///
/// ## Rules
/// - Must not be empty
/// - Plain decimal (`"9.99"`, `"10"`); see [`Money`]'s `FromStr`
/// - Must not be negative
///
/// ```rust
/// use tienda_core::validation::parse_price;
///
/// assert_eq!(parse_price("12.50").unwrap().cents(), 1250);
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("twelve").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    let price: Money = input.parse().map_err(|e| match e {
        CoreError::InvalidAmount { reason, .. } => ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason,
        },
        other => ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: other.to_string(),
        },
    })?;

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

// =============================================================================
// Product Form
// =============================================================================

/// The admin form as typed by the user.
///
/// Every field is text; an empty optional field means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
}

impl ProductForm {
    /// Prefills the form with an existing product for editing.
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_decimal_string(),
            image: product.image.clone().unwrap_or_default(),
            category: String::new(),
        }
    }

    /// Validates the form and converts it into a draft.
    ///
    /// Fields are checked in form order (name, description, price); the first
    /// failure is returned.
    pub fn into_draft(self) -> ValidationResult<ProductDraft> {
        validate_product_name(&self.name)?;
        validate_description(&self.description)?;
        let price = parse_price(&self.price)?;

        Ok(ProductDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            image: non_empty(self.image),
            category: non_empty(self.category),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
