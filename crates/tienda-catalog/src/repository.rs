//! # Product Repository
//!
//! Read and write operations against the product API.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation            Request                 On failure               │
//! │  ─────────            ───────                 ──────────               │
//! │  list_products        GET    /products        empty Vec (logged)       │
//! │  try_list_products    GET    /products        Err                      │
//! │  get_product          GET    /products/{id}   Err (404 → NotFound)     │
//! │  find_product         GET    /products/{id}   None                     │
//! │  create_product       POST   /products        Err                      │
//! │  update_product       PUT    /products/{id}   Err (404 → NotFound)     │
//! │  delete_product       DELETE /products/{id}   Err (404 → NotFound)     │
//! │                                                                         │
//! │  No retries. Each call issues exactly one request.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The browse list degrades because a missing catalog is recoverable by
//! loading again; writes must never fail silently or the user loses edits.

use std::sync::Arc;

use tienda_core::{Product, ProductDraft, ProductId};
use tracing::{debug, info, warn};

use crate::config::{CatalogConfig, WriteDefaults};
use crate::error::{CatalogError, CatalogResult};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use crate::wire::{RemoteProduct, RemoteProductBody};

const PRODUCTS_PATH: &str = "/products";

/// `/products/{id}` with the id as one percent-encoded segment.
///
/// Ids that would resolve to another resource (`""`, `.`, `..`) are
/// rejected; `/`, `?` and `#` inside an id are encoded.
fn product_path(id: &ProductId) -> CatalogResult<String> {
    let raw = id.to_string();
    if matches!(raw.as_str(), "" | "." | "..") {
        return Err(CatalogError::InvalidId(id.clone()));
    }
    Ok(format!("{}/{}", PRODUCTS_PATH, urlencoding::encode(&raw)))
}

/// Adapter between the product API and [`Product`].
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::from_config(&config)?;
///
/// let catalog = repo.list_products().await;          // never fails
/// let created = repo.create_product(&draft).await?;  // surfaces errors
/// ```
#[derive(Clone)]
pub struct ProductRepository {
    transport: Arc<dyn Transport>,
    defaults: WriteDefaults,
}

impl std::fmt::Debug for ProductRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductRepository")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl ProductRepository {
    /// Creates a repository over any transport.
    pub fn new(transport: Arc<dyn Transport>, defaults: WriteDefaults) -> Self {
        ProductRepository {
            transport,
            defaults,
        }
    }

    /// Creates a repository talking HTTP to the configured API.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let transport = HttpTransport::new(&config.api)?;
        Ok(Self::new(Arc::new(transport), config.defaults.clone()))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches the whole catalog for browsing.
    ///
    /// Never fails: on any error the catalog is shown as empty and the cause
    /// is logged.
    pub async fn list_products(&self) -> Vec<Product> {
        match self.try_list_products().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Product list unavailable, showing empty catalog");
                Vec::new()
            }
        }
    }

    /// Fetches the whole catalog, surfacing failures.
    ///
    /// Individual records that cannot be mapped (e.g. negative price) are
    /// skipped with a warning; the rest of the catalog is still returned.
    pub async fn try_list_products(&self) -> CatalogResult<Vec<Product>> {
        let request = ApiRequest::get(PRODUCTS_PATH);
        let response = self.send_checked(request, None).await?;
        let records: Vec<RemoteProduct> = response.json()?;

        let total = records.len();
        let products: Vec<Product> = records
            .into_iter()
            .filter_map(|record| match Product::try_from(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable product record");
                    None
                }
            })
            .collect();

        debug!(count = products.len(), skipped = total - products.len(), "Products listed");
        Ok(products)
    }

    /// Fetches one product.
    ///
    /// ## Errors
    /// - `NotFound` when the API answers 404 or with an empty body
    /// - network failures otherwise
    pub async fn get_product(&self, id: &ProductId) -> CatalogResult<Product> {
        let response = self
            .send_checked(ApiRequest::get(product_path(id)?), Some(id))
            .await?;

        // fakestoreapi answers 200 with no body for unknown ids
        if response.is_blank() {
            return Err(CatalogError::NotFound(id.clone()));
        }

        let record: RemoteProduct = response.json()?;
        Product::try_from(record)
    }

    /// Fetches one product, collapsing every failure to `None`.
    pub async fn find_product(&self, id: &ProductId) -> Option<Product> {
        match self.get_product(id).await {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(%id, error = %e, "Product lookup failed");
                None
            }
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates a product; the server assigns its id.
    pub async fn create_product(&self, draft: &ProductDraft) -> CatalogResult<Product> {
        let body = self.body_for(draft)?;
        let response = self
            .send_checked(ApiRequest::post(PRODUCTS_PATH, body), None)
            .await?;

        let product = Product::try_from(response.json::<RemoteProduct>()?)?;
        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replaces every field of an existing product.
    pub async fn update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> CatalogResult<Product> {
        let body = self.body_for(draft)?;
        let response = self
            .send_checked(ApiRequest::put(product_path(id)?, body), Some(id))
            .await?;

        let product = Product::try_from(response.json::<RemoteProduct>()?)?;
        info!(%id, name = %product.name, "Product updated");
        Ok(product)
    }

    /// Deletes a product. `Ok(())` means the API confirmed the deletion.
    pub async fn delete_product(&self, id: &ProductId) -> CatalogResult<()> {
        self.send_checked(ApiRequest::delete(product_path(id)?), Some(id))
            .await?;

        info!(%id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn body_for(&self, draft: &ProductDraft) -> CatalogResult<serde_json::Value> {
        let body = RemoteProductBody::from_draft(draft, &self.defaults)?;
        Ok(serde_json::to_value(body)?)
    }

    /// Sends the request and turns non-success statuses into errors.
    ///
    /// `target` is the product the request is about; a 404 on it becomes
    /// `NotFound`.
    async fn send_checked(
        &self,
        request: ApiRequest,
        target: Option<&ProductId>,
    ) -> CatalogResult<ApiResponse> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        match target {
            Some(id) if response.status == 404 => Err(CatalogError::NotFound(id.clone())),
            _ => Err(CatalogError::Status {
                method,
                path,
                status: response.status,
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
