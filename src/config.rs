//! Provider configuration loaded from the environment.

use dotenv::dotenv;
use std::time::Duration;

/// Default provider endpoint (CryptoCompare min-api).
pub const DEFAULT_BASE_URL: &str = "https://min-api.cryptocompare.com";

/// Default quote currency for all symbol pairs.
pub const DEFAULT_QUOTE_CURRENCY: &str = "JPY";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Market-data provider settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the histo-candle API.
    pub base_url: String,
    /// Quote currency appended to every request (`tsym`).
    pub quote_currency: String,
    /// Hard timeout applied to every provider request. An indefinite hang
    /// surfaces as `ProviderUnavailable`.
    pub http_timeout: Duration,
}

impl ProviderConfig {
    /// Load configuration from the environment, falling back to defaults.
    /// Reads `.env` if present. No variable is required.
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            base_url: std::env::var("CANDLEBOARD_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            quote_currency: std::env::var("CANDLEBOARD_QUOTE_CURRENCY")
                .unwrap_or_else(|_| DEFAULT_QUOTE_CURRENCY.to_string()),
            http_timeout: std::env::var("CANDLEBOARD_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
