//! # Catalog Commands
//!
//! Browsing: the product list and a single product.
//!
//! ## Catalog Card
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [1] Fjallraven Backpack                                   $109.95     │
//! │      Your perfect pack for everyday use and walks in the forest.       │
//! │      Stash your laptop (up to 15 inches) in the padded sleeve, ...     │
//! │      image: https://fakestoreapi.com/img/81fPKd-2AYL.jpg               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list view never fails: an unreachable catalog renders as empty.

use std::borrow::Cow;
use std::fmt::Write as _;

use tienda_catalog::ProductRepository;
use tienda_core::{Product, ProductId};
use tracing::debug;

use crate::error::AppResult;
use crate::state::ConfigState;

/// Fetches and renders the catalog.
///
/// `full` shows whole descriptions instead of the preview.
pub async fn catalog(repo: &ProductRepository, config: &ConfigState, full: bool) -> String {
    let products = repo.list_products().await;
    debug!(count = products.len(), "catalog command");
    render_catalog(&products, config, full)
}

/// Fetches and renders one product with its full description.
pub async fn show(
    repo: &ProductRepository,
    config: &ConfigState,
    id: &ProductId,
) -> AppResult<String> {
    debug!(%id, "show command");
    let product = repo.get_product(id).await?;
    Ok(render_product(&product, config, true))
}

/// Renders a product list, one card per product.
pub fn render_catalog(products: &[Product], config: &ConfigState, full: bool) -> String {
    if products.is_empty() {
        return "No products available.\n".to_string();
    }

    products
        .iter()
        .map(|p| render_product(p, config, full))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders one product card.
pub fn render_product(product: &Product, config: &ConfigState, full: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {}  {}",
        product.id,
        product.name,
        config.format_money(product.price)
    );

    let description = if full {
        Cow::Borrowed(product.description.as_str())
    } else {
        product.short_description(config.description_preview_chars)
    };
    if !description.is_empty() {
        let _ = writeln!(out, "    {}", description);
    }

    if let Some(image) = &product.image {
        let _ = writeln!(out, "    image: {}", image);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tienda_catalog::memory::{Failure, MemoryTransport};
    use tienda_catalog::WriteDefaults;
    use tienda_core::Money;

    fn repo(transport: &Arc<MemoryTransport>) -> ProductRepository {
        ProductRepository::new(transport.clone(), WriteDefaults::default())
    }

    fn transport() -> Arc<MemoryTransport> {
        Arc::new(MemoryTransport::with_records([
            json!({"id": 1, "title": "Shirt", "price": 9.99, "description": "d", "category": "c", "image": "u"}),
            json!({"id": 2, "title": "Novel", "price": 20, "description": "x".repeat(150)}),
        ]))
    }

    #[tokio::test]
    async fn test_catalog_renders_cards() {
        let out = catalog(&repo(&transport()), &ConfigState::default(), false).await;

        assert!(out.contains("[1] Shirt  $9.99"));
        assert!(out.contains("    image: u"));
        assert!(out.contains(&format!("    {}...", "x".repeat(100))));
        assert!(!out.contains(&"x".repeat(101)));
    }

    #[tokio::test]
    async fn test_catalog_full_descriptions() {
        let out = catalog(&repo(&transport()), &ConfigState::default(), true).await;
        assert!(out.contains(&"x".repeat(150)));
        assert!(!out.contains("..."));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_renders_empty() {
        let transport = transport();
        transport.fail_with(Failure::Network);

        let out = catalog(&repo(&transport), &ConfigState::default(), false).await;
        assert_eq!(out, "No products available.\n");
    }

    #[tokio::test]
    async fn test_show_missing_product() {
        let err = show(&repo(&transport()), &ConfigState::default(), &ProductId::from(5))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Product not found: 5");
    }

    #[test]
    fn test_render_product_without_image_or_description() {
        let product = Product {
            id: ProductId::from("sku-9"),
            name: "Gift card".to_string(),
            description: String::new(),
            price: Money::from_cents(2500),
            image: None,
        };
        let out = render_product(&product, &ConfigState::default(), false);
        assert_eq!(out, "[sku-9] Gift card  $25.00\n");
    }
}
