//! # Admin Commands
//!
//! The product administration view: list, create, edit, delete.
//!
//! ## Admin Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Admin Panel                                          │
//! │                                                                         │
//! │  load() ──► products ◄──────────────────────────────────┐              │
//! │                │                                         │              │
//! │          begin_edit(id)                                  │ reload       │
//! │                │                                         │ (success)    │
//! │                ▼                                         │              │
//! │  form ──► submit() ──► create_product / update_product ──┤              │
//! │                                                          │              │
//! │  delete(id) ──────────► delete_product ──────────────────┘              │
//! │                                                                         │
//! │  Any failure: last_error is set, form and list are left as they were   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tienda_catalog::ProductRepository;
use tienda_core::{Product, ProductForm, ProductId};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

const LOAD_FAILED: &str = "Failed to load products. Check your internet connection.";
const CREATE_FAILED: &str = "Failed to create the product.";
const UPDATE_FAILED: &str = "Failed to update the product.";
const DELETE_FAILED: &str = "Failed to delete the product.";

/// View model of the admin screen.
#[derive(Debug)]
pub struct AdminPanel {
    repo: ProductRepository,
    products: Vec<Product>,
    form: ProductForm,
    editing: Option<ProductId>,
    last_error: Option<String>,
}

impl AdminPanel {
    /// Creates an empty panel. Call [`AdminPanel::load`] to fill it.
    pub fn new(repo: ProductRepository) -> Self {
        AdminPanel {
            repo,
            products: Vec::new(),
            form: ProductForm::default(),
            editing: None,
            last_error: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Id of the product being edited; `None` means the form creates.
    pub fn editing(&self) -> Option<&ProductId> {
        self.editing.as_ref()
    }

    /// Message for the error banner, if the last action failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Reloads the product list.
    ///
    /// On failure the previous list is kept and the error banner is set.
    pub async fn load(&mut self) -> bool {
        self.last_error = None;

        match self.repo.try_list_products().await {
            Ok(products) => {
                debug!(count = products.len(), "Admin list loaded");
                self.products = products;
                true
            }
            Err(e) => {
                warn!(error = %e, "Admin list failed to load");
                self.last_error = Some(LOAD_FAILED.to_string());
                false
            }
        }
    }

    /// Prefills the form with a product and switches to edit mode.
    ///
    /// The loaded list is searched first; an id it does not hold is fetched
    /// from the API.
    pub async fn begin_edit(&mut self, id: &ProductId) -> AppResult<()> {
        let product = match self.products.iter().find(|p| &p.id == id) {
            Some(product) => product.clone(),
            None => self
                .repo
                .find_product(id)
                .await
                .ok_or_else(|| AppError::not_found("Product", &id.to_string()))?,
        };

        self.form = ProductForm::from_product(&product);
        self.editing = Some(id.clone());
        Ok(())
    }

    /// Clears the form and leaves edit mode.
    pub fn cancel(&mut self) {
        self.form = ProductForm::default();
        self.editing = None;
    }

    /// Validates the form and creates or updates the product.
    ///
    /// On success the form is cleared and the list reloaded. On failure the
    /// form is kept so the user can correct it.
    pub async fn submit(&mut self) -> AppResult<Product> {
        let draft = match self.form.clone().into_draft() {
            Ok(draft) => draft,
            Err(e) => {
                let err = AppError::from(e);
                self.last_error = Some(err.message.clone());
                return Err(err);
            }
        };

        let result = match &self.editing {
            Some(id) => self
                .repo
                .update_product(id, &draft)
                .await
                .map_err(|e| (UPDATE_FAILED, e)),
            None => self
                .repo
                .create_product(&draft)
                .await
                .map_err(|e| (CREATE_FAILED, e)),
        };

        match result {
            Ok(product) => {
                self.cancel();
                self.load().await;
                Ok(product)
            }
            Err((banner, e)) => {
                self.last_error = Some(banner.to_string());
                Err(AppError::from(e))
            }
        }
    }

    /// Deletes a product and reloads the list.
    pub async fn delete(&mut self, id: &ProductId) -> AppResult<()> {
        match self.repo.delete_product(id).await {
            Ok(()) => {
                if self.editing.as_ref() == Some(id) {
                    self.cancel();
                }
                self.load().await;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(DELETE_FAILED.to_string());
                Err(AppError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;
    use std::sync::Arc;
    use tienda_catalog::memory::{Failure, MemoryTransport};
    use tienda_catalog::{Method, WriteDefaults};
    use tienda_core::Money;

    fn panel() -> (Arc<MemoryTransport>, AdminPanel) {
        let transport = Arc::new(MemoryTransport::with_records([
            json!({"id": 1, "title": "Shirt", "price": 9.99, "description": "Cotton", "image": "u"}),
            json!({"id": 2, "title": "Mug", "price": 12.5, "description": "Ceramic"}),
        ]));
        let repo = ProductRepository::new(transport.clone(), WriteDefaults::default());
        (transport, AdminPanel::new(repo))
    }

    fn fill(form: &mut ProductForm, name: &str, description: &str, price: &str) {
        form.name = name.to_string();
        form.description = description.to_string();
        form.price = price.to_string();
    }

    #[tokio::test]
    async fn test_load() {
        let (_transport, mut panel) = panel();
        assert!(panel.load().await);
        assert_eq!(panel.products().len(), 2);
        assert!(panel.last_error().is_none());
    }

    #[tokio::test]
    async fn test_failed_load_sets_banner_and_keeps_list() {
        let (transport, mut panel) = panel();
        panel.load().await;

        transport.fail_with(Failure::Network);
        assert!(!panel.load().await);
        assert_eq!(panel.last_error(), Some(LOAD_FAILED));
        assert_eq!(panel.products().len(), 2);
    }

    #[tokio::test]
    async fn test_create_reloads_list() {
        let (transport, mut panel) = panel();
        panel.load().await;

        fill(panel.form_mut(), "Hat", "Wool hat", "15");
        let created = panel.submit().await.unwrap();

        assert_eq!(created.id, ProductId::from(3));
        assert_eq!(panel.products().len(), 3);
        assert_eq!(panel.form(), &ProductForm::default());

        let methods: Vec<_> = transport.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Get, Method::Post, Method::Get]);
    }

    #[tokio::test]
    async fn test_edit_prefills_and_updates() {
        let (transport, mut panel) = panel();
        panel.load().await;

        panel.begin_edit(&ProductId::from(2)).await.unwrap();
        assert_eq!(panel.form().name, "Mug");
        assert_eq!(panel.form().price, "12.50");
        assert_eq!(panel.editing(), Some(&ProductId::from(2)));

        panel.form_mut().price = "14".to_string();
        let updated = panel.submit().await.unwrap();

        assert_eq!(updated.price, Money::from_cents(1400));
        assert!(panel.editing().is_none());
        assert_eq!(transport.record(2).unwrap()["price"], json!(14.0));
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_product() {
        let (_transport, mut panel) = panel();
        panel.load().await;

        let err = panel.begin_edit(&ProductId::from(8)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_begin_edit_fetches_unlisted_product() {
        let (transport, mut panel) = panel();
        assert!(panel.products().is_empty());

        panel.begin_edit(&ProductId::from(2)).await.unwrap();
        assert_eq!(panel.form().name, "Mug");
        assert_eq!(panel.editing(), Some(&ProductId::from(2)));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/products/2");
    }

    #[tokio::test]
    async fn test_cancel_returns_to_create_mode() {
        let (_transport, mut panel) = panel();
        panel.load().await;
        panel.begin_edit(&ProductId::from(1)).await.unwrap();

        panel.cancel();
        assert!(panel.editing().is_none());
        assert_eq!(panel.form(), &ProductForm::default());
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let (transport, mut panel) = panel();

        fill(panel.form_mut(), "Hat", "Wool hat", "-3");
        let err = panel.submit().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(panel.last_error(), Some("price must not be negative"));
        assert_eq!(panel.form().name, "Hat");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_form() {
        let (transport, mut panel) = panel();
        panel.load().await;
        panel.begin_edit(&ProductId::from(1)).await.unwrap();

        transport.fail_with(Failure::Status(500));
        assert!(panel.submit().await.is_err());

        assert_eq!(panel.last_error(), Some(UPDATE_FAILED));
        assert_eq!(panel.editing(), Some(&ProductId::from(1)));
        assert_eq!(panel.form().name, "Shirt");
    }

    #[tokio::test]
    async fn test_delete_reloads_list() {
        let (_transport, mut panel) = panel();
        panel.load().await;

        panel.delete(&ProductId::from(1)).await.unwrap();
        assert_eq!(panel.products().len(), 1);
        assert_eq!(panel.products()[0].name, "Mug");
    }

    #[tokio::test]
    async fn test_failed_delete_sets_banner() {
        let (transport, mut panel) = panel();
        panel.load().await;
        transport.fail_with(Failure::Network);

        let err = panel.delete(&ProductId::from(1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(panel.last_error(), Some(DELETE_FAILED));
        assert_eq!(panel.products().len(), 2);
    }
}
