//! # tienda-core: Pure Domain Logic for Tienda
//!
//! This crate holds the parts of the shop that never touch the network:
//! the product shape the views render, the cart and its totals, money
//! arithmetic, and form validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tienda Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Views (catalog, cart, admin)                    │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │ add / remove                 │ list / CRUD           │
//! │  ┌──────────────▼──────────────┐  ┌────────────▼──────────────────┐    │
//! │  │        Cart Store           │  │       tienda-catalog          │    │
//! │  │   (owned by the front end)  │  │   remote record ⇄ Product     │    │
//! │  └──────────────┬──────────────┘  └────────────┬──────────────────┘    │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────────────────▼──────────────────┐    │
//! │  │               ★ tienda-core (THIS CRATE) ★                     │    │
//! │  │     types: Product, ProductId, ProductDraft                    │    │
//! │  │     cart:  Cart, CartLine, calculate_total                     │    │
//! │  │     money: Money      validation: ProductForm                  │    │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, ProductId, ProductDraft
//! - [`cart`] - Cart and CartLine with quantity aggregation
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Admin form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::{Cart, Money, Product, ProductId};
//!
//! let shirt = Product {
//!     id: ProductId::from(1),
//!     name: "Shirt".to_string(),
//!     description: "Cotton".to_string(),
//!     price: Money::from_cents(1000),
//!     image: None,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_product(shirt.clone());
//! cart.add_product(shirt);
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.total(), Money::from_cents(2000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{calculate_total, Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use validation::ProductForm;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of characters of a description shown before it is cut with `...`.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Maximum length of a product name accepted by the admin form.
pub const MAX_PRODUCT_NAME_CHARS: usize = 200;

/// Maximum length of a product description accepted by the admin form.
pub const MAX_DESCRIPTION_CHARS: usize = 5000;
