//! # App Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tienda                                 │
//! │                                                                         │
//! │  tienda show 7                                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog Error? ─── CatalogError::NotFound(7) ─────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Form Error? ──── CoreError::Validation ───────► AppError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error: [NOT_FOUND] Product not found: 7      exit code 1      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (URLs, status codes, decoder messages) go to the log;
//! the message carried by [`AppError`] is what the user reads.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tienda_catalog::CatalogError;
use tienda_core::{CoreError, ValidationError};

/// Result type alias for command functions.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json` output a failure is printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 7"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product does not exist
    NotFound,

    /// Admin form input rejected
    ValidationError,

    /// The product API could not be reached or answered with an error
    NetworkError,

    /// Configuration file or environment is invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::NetworkError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts catalog errors to app errors.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => AppError::not_found("Product", &id.to_string()),
            CatalogError::InvalidId(id) => {
                AppError::validation(format!("Invalid product id '{}'", id))
            }
            CatalogError::Transport(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Product API unreachable: {}", e);
                AppError::network("Could not reach the product service")
            }
            CatalogError::Status {
                method,
                path,
                status,
            } => {
                tracing::error!(%method, %path, status, "Product API returned an error status");
                AppError::network(format!("The product service answered with HTTP {}", status))
            }
            CatalogError::Decode(e) => {
                tracing::error!("Unreadable product API response: {}", e);
                AppError::network("The product service sent an unreadable response")
            }
            CatalogError::InvalidConfig(e) => AppError::new(ErrorCode::ConfigError, e),
            CatalogError::ConfigIo(e) => AppError::new(
                ErrorCode::ConfigError,
                format!("Cannot read config file: {}", e),
            ),
            CatalogError::ConfigParse(e) => AppError::new(
                ErrorCode::ConfigError,
                format!("Cannot parse config file: {}", e),
            ),
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::InvalidAmount { input, reason } => {
                AppError::validation(format!("Invalid amount '{}': {}", input, reason))
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tienda_catalog::Method;
    use tienda_core::ProductId;

    #[test]
    fn test_not_found_translation() {
        let err = AppError::from(CatalogError::NotFound(ProductId::from(7)));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 7");
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: 7");
    }

    #[test]
    fn test_network_details_are_not_shown() {
        let err = AppError::from(CatalogError::Transport("dns error: host.internal".into()));
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert!(!err.message.contains("host.internal"));

        let err = AppError::from(CatalogError::Status {
            method: Method::Delete,
            path: "/products/1".into(),
            status: 500,
        });
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert!(err.message.contains("500"));
    }

    #[test]
    fn test_validation_translation() {
        let err = AppError::from(ValidationError::Required {
            field: "name".into(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = AppError::validation("price must not be negative");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "price must not be negative");
    }
}
