//! # Transport
//!
//! The seam between the repository and the network.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductRepository                                                     │
//! │       │  ApiRequest { method: GET, path: "/products", body: None }     │
//! │       ▼                                                                 │
//! │  dyn Transport ──────────────┬───────────────────────────┐             │
//! │                              │                           │             │
//! │                     HttpTransport (reqwest)     MemoryTransport        │
//! │                     base_url + path             (tests only)           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ApiResponse { status: 200, body: b"[...]" }                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A transport reports only failures to get *a* response. Status codes are
//! interpreted by the repository.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ApiSettings;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Request / Response
// =============================================================================

/// HTTP methods the product API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// One call to the API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path, e.g. `/products/3`.
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        ApiRequest {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        ApiRequest {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Raw status and body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response with a JSON body.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        ApiResponse {
            status,
            body: value.to_string().into_bytes(),
        }
    }

    /// Creates a response without a body.
    pub fn empty(status: u16) -> Self {
        ApiResponse {
            status,
            body: Vec::new(),
        }
    }

    /// 2xx.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the body carries no value (empty, whitespace or `null`).
    pub fn is_blank(&self) -> bool {
        let text = String::from_utf8_lossy(&self.body);
        let text = text.trim();
        text.is_empty() || text == "null"
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> CatalogResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// Sends requests to the product API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request and returns whatever the server answered.
    ///
    /// ## Errors
    /// Only when no response was received at all.
    async fn send(&self, request: ApiRequest) -> CatalogResult<ApiResponse>;
}

// =============================================================================
// HTTP Transport
// =============================================================================

/// reqwest-backed transport.
///
/// Every request carries `Content-Type: application/json`. No retries; the
/// timeout is reqwest's default unless `timeout_secs` is set.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Builds the HTTP client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the client fails to build.
    pub fn new(settings: &ApiSettings) -> CatalogResult<Self> {
        let base_url = normalize_base_url(&settings.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if settings.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        }

        Ok(HttpTransport {
            client: builder.build()?,
            base_url,
        })
    }

    /// The base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> CatalogResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| CatalogError::InvalidConfig(format!("Cannot build URL for {}: {}", path, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> CatalogResult<ApiResponse> {
        let url = self.url_for(&request.path)?;
        debug!(method = %request.method, %url, "Sending catalog request");

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "Catalog response received");
        Ok(ApiResponse { status, body })
    }
}

/// Parses the base URL and makes sure it ends with `/`, so joining
/// `products/1` keeps any path prefix (`https://host/api/` + `products/1`).
pub(crate) fn normalize_base_url(raw: &str) -> CatalogResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| CatalogError::InvalidConfig(format!("Invalid API base URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(CatalogError::InvalidConfig(format!(
            "API base URL must use http or https, got: {}",
            raw
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
