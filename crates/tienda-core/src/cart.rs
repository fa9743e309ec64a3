//! # Cart
//!
//! The cart a shopper fills while browsing, as plain data.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  add_product(shirt)      lines: [shirt ×1]                             │
//! │  add_product(mug)        lines: [shirt ×1, mug ×1]                     │
//! │  add_product(shirt)      lines: [shirt ×2, mug ×1]   ◄── aggregated    │
//! │  remove_product(mug)     lines: [shirt ×2]                             │
//! │  remove_product(hat)     lines: [shirt ×2]           ◄── no-op         │
//! │                                                                         │
//! │  total() = Σ price × quantity                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Observers and ownership live in the front end's cart store; this module
//! only knows how lines aggregate and how totals add up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart and how many of it the shopper wants.
///
/// The product is a snapshot taken when the line was created; later catalog
/// reloads do not change the price of a line already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,

    /// Always at least 1.
    pub quantity: u32,

    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a line holding one unit of `product`.
    pub fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// Sums `price × quantity` over any set of lines. Zero for no lines.
///
/// ```rust
/// use tienda_core::{calculate_total, Money};
///
/// assert_eq!(calculate_total(&[]), Money::zero());
/// ```
pub fn calculate_total(lines: &[CartLine]) -> Money {
    lines.iter().map(CartLine::line_total).sum()
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id (adding a present product bumps its
///   quantity instead of adding a line)
/// - Every line has quantity ≥ 1
/// - Lines keep the order in which products were first added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity goes up by one
    /// - Product not in cart: a new line with quantity 1 is appended
    ///
    /// Never fails. Returns the line that now holds the product.
    pub fn add_product(&mut self, product: Product) -> &CartLine {
        match self.lines.iter().position(|l| l.product.id == product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                line
            }
            None => {
                self.lines.push(CartLine::new(product));
                let last = self.lines.len() - 1;
                &self.lines[last]
            }
        }
    }

    /// Removes the line for `product_id`.
    ///
    /// Returns `true` if a line was removed, `false` if the product was not in
    /// the cart (which is not an error).
    pub fn remove_product(&mut self, product_id: &ProductId) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| &l.product.id != product_id);
        self.lines.len() != initial_len
    }

    /// Current lines in insertion order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a product.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total(&self) -> Money {
        calculate_total(&self.lines)
    }

    /// Number of distinct products in the cart.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
