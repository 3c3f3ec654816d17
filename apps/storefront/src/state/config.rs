//! # Configuration State
//!
//! Storefront settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SANTOS_*`)
//! 2. Platform data directory (`directories`)
//! 3. Defaults (this file)
//!
//! | Variable                   | Default                               |
//! |----------------------------|---------------------------------------|
//! | `SANTOS_DATA_DIR`          | platform data dir, else `./santos-data` |
//! | `SANTOS_DB_PATH`           | `<data dir>/santos.db`                |
//! | `SANTOS_STORE_NAME`        | `Santos`                              |
//! | `SANTOS_CURRENCY_SYMBOL`   | `$`                                   |
//! | `SANTOS_CHECKOUT_DELAY_MS` | `2000`                                |
//!
//! Read-only after initialization, so no mutex.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Serialize;
use thiserror::Error;

use santos_core::{Money, FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD};

/// Default simulated order processing time.
pub const DEFAULT_CHECKOUT_DELAY_MS: u64 = 2000;

/// An environment variable held a value that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },
}

/// Storefront configuration.
///
/// Paths stay on the server side; the rest is what the front end sees from
/// `get_config`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Directory holding the key-value files (the saved wishlist).
    #[serde(skip)]
    pub data_dir: PathBuf,

    /// SQLite catalog and accounts database.
    #[serde(skip)]
    pub database_path: PathBuf,

    /// Brand name in the header and order confirmation.
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Simulated order processing time before confirmation.
    pub checkout_delay_ms: u64,

    /// Orders strictly above this subtotal ship free.
    pub free_shipping_threshold: Money,

    /// Shipping fee below the threshold.
    pub flat_shipping: Money,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::with_data_dir(PathBuf::from("./santos-data"))
    }
}

impl ConfigState {
    fn with_data_dir(data_dir: PathBuf) -> Self {
        ConfigState {
            database_path: data_dir.join("santos.db"),
            data_dir,
            store_name: "Santos".to_string(),
            currency_symbol: "$".to_string(),
            checkout_delay_ms: DEFAULT_CHECKOUT_DELAY_MS,
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            flat_shipping: FLAT_SHIPPING,
        }
    }

    /// Builds the configuration from `SANTOS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigState::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// ```rust,ignore
    /// let config = ConfigState::from_lookup(|var| match var {
    ///     "SANTOS_CHECKOUT_DELAY_MS" => Some("0".into()),
    ///     _ => None,
    /// })?;
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("SANTOS_DATA_DIR")
            .map(PathBuf::from)
            .or_else(platform_data_dir)
            .unwrap_or_else(|| PathBuf::from("./santos-data"));

        let mut config = ConfigState::with_data_dir(data_dir);

        if let Some(path) = lookup("SANTOS_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Some(name) = lookup("SANTOS_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(symbol) = lookup("SANTOS_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(delay) = lookup("SANTOS_CHECKOUT_DELAY_MS") {
            config.checkout_delay_ms =
                delay
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        var: "SANTOS_CHECKOUT_DELAY_MS".to_string(),
                        value: delay.clone(),
                        reason: e.to_string(),
                    })?;
        }

        Ok(config)
    }

    /// Configuration for tests: no delay, throwaway paths.
    pub fn for_tests() -> Self {
        ConfigState {
            checkout_delay_ms: 0,
            ..ConfigState::default()
        }
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ```rust,ignore
    /// assert_eq!(config.format_price(Money::from_cents(89_500)), "$895.00");
    /// ```
    pub fn format_price(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

/// `~/.local/share/santos-storefront` on Linux, the Application Support
/// folder on macOS, `%APPDATA%` on Windows.
fn platform_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("studio", "santos", "storefront").map(|dirs| dirs.data_dir().to_path_buf())
}
