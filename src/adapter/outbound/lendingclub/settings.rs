//! LendingClub marketplace configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable holding the marketplace API key.
pub const API_KEY_ENV: &str = "LENDING_API_KEY";

/// LendingClub HTTP client configuration.
///
/// The API key is deliberately absent; it is read from [`API_KEY_ENV`].
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceConfig {
    /// Investor API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_api_url() -> String {
    "https://api.lendingclub.com/api/investor".into()
}

fn default_api_version() -> String {
    "v1".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_version: default_api_version(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl MarketplaceConfig {
    /// Check the settings for values the client cannot work with.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.api_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "marketplace.api_url",
                reason: format!("'{}' is not an absolute URL", self.api_url),
            });
        }
        if self.api_version.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "marketplace.api_version",
                reason: "must not be empty".into(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "marketplace.timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "marketplace.connect_timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Build the order submission URL for one investor account.
    #[must_use]
    pub fn orders_url(&self, investor_id: i64) -> String {
        format!(
            "{}/{}/accounts/{}/orders",
            self.api_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            investor_id
        )
    }
}
