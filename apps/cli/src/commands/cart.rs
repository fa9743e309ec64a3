//! # Cart Commands
//!
//! Fill the session cart from the catalog and render it.
//!
//! ## Cart Display
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shirt                    x2      $9.99      $19.98                     │
//! │  Mug                      x1     $12.50      $12.50                     │
//! │  ───────────────────────────────────────────────────                    │
//! │  2 products, 3 items                  TOTAL  $32.48                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use tienda_catalog::ProductRepository;
use tienda_core::{CoreError, ProductId};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::{CartStore, ConfigState};

/// Outcome of [`fill_cart`].
#[derive(Debug, Default)]
pub struct FillReport {
    /// Ids that were added, in request order (repeats included).
    pub added: Vec<ProductId>,

    /// Ids that are not in the catalog, with the reason each was skipped.
    pub skipped: Vec<AppError>,
}

/// Loads the catalog once and adds each requested id to the cart.
///
/// ## Behavior
/// - Ids are added in order; repeating an id raises its quantity
/// - Ids not in the catalog are reported and skipped, the rest still go in
/// - An unreachable catalog means every id is skipped
pub async fn fill_cart(
    repo: &ProductRepository,
    store: &mut CartStore,
    ids: &[ProductId],
) -> FillReport {
    let catalog = repo.list_products().await;
    debug!(catalog = catalog.len(), requested = ids.len(), "cart command");

    let mut report = FillReport::default();
    for id in ids {
        match catalog.iter().find(|p| &p.id == id) {
            Some(product) => {
                store.add_product(product.clone());
                report.added.push(id.clone());
            }
            None => {
                warn!(%id, "Requested product is not in the catalog");
                report
                    .skipped
                    .push(AppError::from(CoreError::ProductNotFound(id.to_string())));
            }
        }
    }
    report
}

/// Renders the cart lines and totals.
pub fn render_cart(store: &CartStore, config: &ConfigState) -> String {
    if store.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for line in store.items() {
        let _ = writeln!(
            out,
            "{:<28} x{:<4} {:>10} {:>10}",
            line.product.name,
            line.quantity,
            config.format_money(line.product.price),
            config.format_money(line.line_total())
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(56));
    let _ = writeln!(
        out,
        "{} products, {} items {:>22} {:>10}",
        store.line_count(),
        store.total_quantity(),
        "TOTAL",
        config.format_money(store.total())
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;
    use std::sync::Arc;
    use tienda_catalog::memory::{Failure, MemoryTransport};
    use tienda_catalog::WriteDefaults;
    use tienda_core::Money;

    fn repo() -> (Arc<MemoryTransport>, ProductRepository) {
        let transport = Arc::new(MemoryTransport::with_records([
            json!({"id": 1, "title": "Shirt", "price": 10, "description": "d"}),
            json!({"id": 2, "title": "Mug", "price": 5, "description": "m"}),
        ]));
        let repo = ProductRepository::new(transport.clone(), WriteDefaults::default());
        (transport, repo)
    }

    #[tokio::test]
    async fn test_fill_cart_aggregates_and_totals() {
        let (transport, repo) = repo();
        let mut store = CartStore::new();
        let ids = [ProductId::from(1), ProductId::from(2), ProductId::from(1)];

        let report = fill_cart(&repo, &mut store, &ids).await;

        assert_eq!(report.added.len(), 3);
        assert!(report.skipped.is_empty());
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.total(), Money::from_cents(2500));
        // catalog is fetched once, not per id
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_skipped() {
        let (_transport, repo) = repo();
        let mut store = CartStore::new();
        let ids = [ProductId::from(9), ProductId::from(2)];

        let report = fill_cart(&repo, &mut store, &ids).await;

        assert_eq!(report.added, vec![ProductId::from(2)]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].code, ErrorCode::NotFound);
        assert_eq!(report.skipped[0].message, "Product not found: 9");
        assert_eq!(store.line_count(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_catalog_skips_everything() {
        let (transport, repo) = repo();
        transport.fail_with(Failure::Status(503));
        let mut store = CartStore::new();

        let report = fill_cart(&repo, &mut store, &[ProductId::from(1)]).await;
        assert!(report.added.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_render_cart() {
        let (_transport, repo) = repo();
        let mut store = CartStore::new();
        let config = ConfigState::default();
        assert_eq!(render_cart(&store, &config), "Your cart is empty.\n");

        fill_cart(&repo, &mut store, &[ProductId::from(1), ProductId::from(1)]).await;
        let out = render_cart(&store, &config);

        assert!(out.starts_with("Shirt"));
        assert!(out.contains("x2"));
        assert!(out.contains("$20.00"));
        assert!(out.contains("1 products, 2 items"));
        assert!(out.trim_end().ends_with("$20.00"));
    }
}
