//! # tienda-catalog: Product API Adapter
//!
//! Talks to a fakestoreapi-style REST API and hands the rest of the
//! application plain [`tienda_core::Product`] values.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Data Flow                                │
//! │                                                                         │
//! │  View (catalog / admin)                                                │
//! │       │  repo.list_products()                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 tienda-catalog (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────────┐  ┌──────────────┐  ┌──────────────────┐  │   │
//! │  │  │ ProductRepository│  │    wire      │  │    Transport     │  │   │
//! │  │  │ (repository.rs)  │─►│ title ⇄ name │─►│ HttpTransport    │  │   │
//! │  │  │ result policies  │  │ price ⇄ Money│  │ (reqwest)        │  │   │
//! │  │  └──────────────────┘  └──────────────┘  └────────┬─────────┘  │   │
//! │  └───────────────────────────────────────────────────┼─────────────┘   │
//! │                                                      ▼                  │
//! │                                   https://fakestoreapi.com/products     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Result Conventions
//! - [`ProductRepository::list_products`] never fails: a broken catalog
//!   shows up as an empty list and a warning in the log.
//! - Every other operation returns [`CatalogResult`] so the caller can show
//!   the failure to the user.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tienda_catalog::{CatalogConfig, ProductRepository};
//!
//! let config = CatalogConfig::load(None)?;
//! let repo = ProductRepository::from_config(&config)?;
//!
//! let products = repo.list_products().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod repository;
pub mod transport;
pub mod wire;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiSettings, CatalogConfig, WriteDefaults};
pub use error::{CatalogError, CatalogResult};
pub use repository::ProductRepository;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
