//! # Cart Store
//!
//! The session's cart and the observers watching it.
//!
//! ## Ownership
//! The store is an ordinary owned value: whoever holds `&mut CartStore` is
//! the only writer. Views that need to follow the cart take a
//! [`watch::Receiver`] from [`CartStore::subscribe`] and always see the most
//! recent snapshot.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action              Store Method            Observers             │
//! │  ───────────              ────────────            ─────────             │
//! │                                                                         │
//! │  Add to cart ───────────► add_product() ────────► snapshot sent        │
//! │                                                                         │
//! │  Remove (present) ──────► remove_product() ─────► snapshot sent        │
//! │                                                                         │
//! │  Remove (absent) ───────► remove_product() ─────► (nothing)            │
//! │                                                                         │
//! │  Render cart ───────────► items() / total() ────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tienda_core::{Cart, CartLine, Money, Product, ProductId};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

/// What observers receive after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub taken_at: DateTime<Utc>,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
            taken_at: Utc::now(),
        }
    }
}

/// The session cart.
///
/// ## Usage
/// ```rust,ignore
/// let mut store = CartStore::new();
/// let mut rx = store.subscribe();
///
/// store.add_product(shirt);
/// assert_eq!(rx.borrow_and_update().totals.line_count, 1);
/// ```
#[derive(Debug)]
pub struct CartStore {
    session_id: Uuid,
    cart: Cart,
    observers: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Creates a new empty cart for this session.
    pub fn new() -> Self {
        let cart = Cart::new();
        let (observers, _) = watch::channel(CartSnapshot::from(&cart));
        let session_id = Uuid::new_v4();

        debug!(%session_id, "Cart session started");

        CartStore {
            session_id,
            cart,
            observers,
        }
    }

    /// Adds one unit of `product` and notifies observers.
    ///
    /// Returns the quantity of that product now in the cart.
    pub fn add_product(&mut self, product: Product) -> u32 {
        let id = product.id.clone();
        let quantity = self.cart.add_product(product).quantity;

        debug!(session_id = %self.session_id, %id, quantity, "Product added to cart");
        self.publish();
        quantity
    }

    /// Removes the line for `product_id`.
    ///
    /// Absent products are ignored; observers hear about it only when a line
    /// was actually removed.
    pub fn remove_product(&mut self, product_id: &ProductId) -> bool {
        let removed = self.cart.remove_product(product_id);
        if removed {
            debug!(session_id = %self.session_id, id = %product_id, "Product removed from cart");
            self.publish();
        }
        removed
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Current lines, for rendering.
    pub fn items(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.observers.subscribe()
    }

    /// Snapshot of the cart as observers see it.
    pub fn snapshot(&self) -> CartSnapshot {
        self.observers.borrow().clone()
    }

    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    pub fn total_quantity(&self) -> u64 {
        self.cart.total_quantity()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn publish(&self) {
        // send_replace stores the value even when nobody is subscribed yet
        self.observers.send_replace(CartSnapshot::from(&self.cart));
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, cents: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {}", id),
            description: String::new(),
            price: Money::from_cents(cents),
            image: None,
        }
    }

    #[test]
    fn test_add_same_product_twice() {
        let mut store = CartStore::new();
        assert_eq!(store.add_product(product(1, 1000)), 1);
        assert_eq!(store.add_product(product(1, 1000)), 2);

        assert_eq!(store.line_count(), 1);
        assert_eq!(store.total_quantity(), 2);
        assert_eq!(store.items()[0].quantity, 2);
    }

    #[test]
    fn test_total() {
        let mut store = CartStore::new();
        assert_eq!(store.total(), Money::zero());

        store.add_product(product(1, 1000));
        store.add_product(product(1, 1000));
        store.add_product(product(2, 500));
        assert_eq!(store.total(), Money::from_cents(2500));
    }

    #[test]
    fn test_observers_see_latest_snapshot() {
        let mut store = CartStore::new();
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().lines.is_empty());

        store.add_product(product(1, 1000));
        store.add_product(product(2, 500));

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.totals.line_count, 2);
        assert_eq!(snapshot.totals.total, Money::from_cents(1500));
        assert_eq!(snapshot, store.snapshot());
    }

    #[test]
    fn test_removing_absent_product_does_not_notify() {
        let mut store = CartStore::new();
        store.add_product(product(1, 1000));

        let mut rx = store.subscribe();
        rx.borrow_and_update();

        assert!(!store.remove_product(&ProductId::from(99)));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.line_count(), 1);

        assert!(store.remove_product(&ProductId::from(1)));
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().lines.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_late_subscriber_gets_current_state() {
        let mut store = CartStore::new();
        store.add_product(product(3, 250));

        let rx = store.subscribe();
        assert_eq!(rx.borrow().totals.total_quantity, 1);
    }
}
