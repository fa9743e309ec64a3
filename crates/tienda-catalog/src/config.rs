//! # Catalog Configuration
//!
//! Where the product API lives and what to send when the admin form leaves
//! optional fields empty.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TIENDA_API_URL=http://localhost:3000                               │
//! │     TIENDA_API_TIMEOUT=10                                              │
//! │     TIENDA_DEFAULT_CATEGORY=clothing                                   │
//! │     TIENDA_PLACEHOLDER_IMAGE=https://img.example/none.png              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tienda/tienda.toml (Linux)                               │
//! │     ~/Library/Application Support/com.tienda.shop/tienda.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://fakestoreapi.com, "general", via.placeholder.com image     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://fakestoreapi.com"
//! timeout_secs = 0   # 0 = transport default
//!
//! [defaults]
//! category = "general"
//! image = "https://via.placeholder.com/150"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::transport::normalize_base_url;

/// Public product API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Category sent on writes when the draft has none.
pub const DEFAULT_CATEGORY: &str = "general";

/// Image sent on writes when the draft has none.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

// =============================================================================
// API Settings
// =============================================================================

/// Connection settings for the product API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; request paths such as `/products` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. 0 leaves reqwest's default in place.
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: 0,
        }
    }
}

// =============================================================================
// Write Defaults
// =============================================================================

/// Values filled into create/update bodies for fields the draft left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteDefaults {
    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_image")]
    pub image: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

impl Default for WriteDefaults {
    fn default() -> Self {
        WriteDefaults {
            category: default_category(),
            image: default_image(),
        }
    }
}

// =============================================================================
// Main Catalog Configuration
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub defaults: WriteDefaults,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`tienda.toml`), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        normalize_base_url(&self.api.base_url)?;

        if self.defaults.category.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "defaults.category must not be empty".into(),
            ));
        }

        if self.defaults.image.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "defaults.image must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `TIENDA_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("TIENDA_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = var("TIENDA_API_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric TIENDA_API_TIMEOUT"),
            }
        }

        if let Some(category) = var("TIENDA_DEFAULT_CATEGORY") {
            self.defaults.category = category;
        }

        if let Some(image) = var("TIENDA_PLACEHOLDER_IMAGE") {
            self.defaults.image = image;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tienda", "shop")
            .map(|dirs| dirs.config_dir().join("tienda.toml"))
    }
}
