//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the marketplace API key is never
//! part of the file and comes from the `LENDING_API_KEY` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use noteorder::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::risk::RiskConfig;
use crate::adapter::outbound::lendingclub::MarketplaceConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Marketplace endpoint and HTTP timeouts.
    #[serde(default)]
    pub marketplace: MarketplaceConfig,

    /// Per-order risk limits.
    #[serde(default)]
    pub risk: RiskConfig,

    /// SQLite database path for the order ledger.
    #[serde(default = "default_database_path")]
    pub database: String,
}

fn default_database_path() -> String {
    "noteorder.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            marketplace: MarketplaceConfig::default(),
            risk: RiskConfig::default(),
            database: default_database_path(),
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or a value is out of range.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        self.logging.validate()?;
        self.marketplace.validate()?;
        self.risk.validate()?;
        Ok(())
    }

    /// Initialize the global tracing subscriber from `[logging]`.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// SQLite connection URL for the ledger.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.database, "noteorder.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.marketplace.api_version, "v1");
        assert_eq!(config.risk.amount_increment, dec!(25));
    }

    #[test]
    fn full_file_is_parsed() {
        let toml = r#"
            database = "/var/lib/noteorder/ledger.db"

            [logging]
            level = "debug"
            format = "json"

            [marketplace]
            api_url = "https://sandbox.example.test/api/investor"
            api_version = "v2"
            timeout_ms = 4000
            connect_timeout_ms = 1000

            [risk]
            max_order_amount = "200"
            amount_increment = "25"
            blocked_loans = [101, 202]
        "#;
        let config = Config::parse_toml(toml).unwrap();

        assert_eq!(config.database_url(), "/var/lib/noteorder/ledger.db");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.marketplace.timeout_ms, 4000);
        assert_eq!(config.risk.max_order_amount, dec!(200));
        assert_eq!(config.risk.blocked_loans.len(), 2);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = Config::parse_toml("database = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn non_positive_limit_is_rejected() {
        let result = Config::parse_toml("[risk]\nmax_order_amount = \"0\"");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "risk.max_order_amount",
                ..
            }))
        ));
    }

    #[test]
    fn blocked_loan_ids_must_be_positive() {
        assert!(Config::parse_toml("[risk]\nblocked_loans = [0]").is_err());
    }

    #[test]
    fn empty_database_is_rejected() {
        let result = Config::parse_toml("database = \"\"");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "database" }))
        ));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let result = Config::load("/nonexistent/noteorder.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }
}
