//! # Configuration State
//!
//! Display settings for the terminal views.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TIENDA_CURRENCY_SYMBOL`, `TIENDA_PREVIEW_CHARS`)
//! 2. Defaults (this file)
//!
//! Where the product API lives is not a display concern; that is
//! `tienda_catalog::CatalogConfig`.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use tienda_core::{Money, DESCRIPTION_PREVIEW_CHARS};
use tracing::warn;

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Currency symbol placed before amounts
    pub currency_symbol: String,

    /// Characters of a description shown in list views before `...`
    pub description_preview_chars: usize,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            currency_symbol: "$".to_string(),
            description_preview_chars: DESCRIPTION_PREVIEW_CHARS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(symbol) = var("TIENDA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(chars) = var("TIENDA_PREVIEW_CHARS") {
            match chars.parse::<usize>() {
                Ok(n) if n > 0 => config.description_preview_chars = n,
                _ => warn!(value = %chars, "Ignoring invalid TIENDA_PREVIEW_CHARS"),
            }
        }

        config
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let cents = amount.cents();
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}
