//! # Catalog Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │ Network failure │  │   Not found     │  │    Configuration        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Transport      │  │  NotFound       │  │  InvalidConfig          │ │
//! │  │  Status         │  │                 │  │  ConfigIo               │ │
//! │  │  Decode         │  │  InvalidId      │  │  ConfigParse            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tienda_core::ProductId;

use crate::transport::Method;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Everything that can go wrong talking to the product API.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Network Failures
    // =========================================================================
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("{method} {path} returned HTTP {status}")]
    Status {
        method: Method,
        path: String,
        status: u16,
    },

    /// The response body was not the record shape we expect.
    #[error("Invalid response body: {0}")]
    Decode(String),

    // =========================================================================
    // Not Found
    // =========================================================================
    /// No product with this id exists on the remote side.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The id cannot name a single product (empty, `.` or `..`); nothing
    /// was sent.
    #[error("Invalid product id '{0}'")]
    InvalidId(ProductId),

    // =========================================================================
    // Configuration
    // =========================================================================
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl CatalogError {
    /// Transport-level trouble, a non-success status, or an unreadable body.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Transport(_) | CatalogError::Status { .. } | CatalogError::Decode(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}
