//! Risk limit configuration.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapter::outbound::risk::RiskLimits;
use crate::domain::LoanId;
use crate::error::ConfigError;

/// Per-order risk limits.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Largest amount a single order may request.
    #[serde(default = "default_max_order_amount")]
    pub max_order_amount: Decimal,
    /// Order amounts must be a multiple of this (notes sell in $25 units).
    #[serde(default = "default_amount_increment")]
    pub amount_increment: Decimal,
    /// Loans never to be ordered.
    #[serde(default)]
    pub blocked_loans: Vec<LoanId>,
}

fn default_max_order_amount() -> Decimal {
    Decimal::from(500)
}

fn default_amount_increment() -> Decimal {
    Decimal::from(25)
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_order_amount: default_max_order_amount(),
            amount_increment: default_amount_increment(),
            blocked_loans: Vec::new(),
        }
    }
}

impl RiskConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_order_amount <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "risk.max_order_amount",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.amount_increment <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "risk.amount_increment",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

impl From<RiskConfig> for RiskLimits {
    fn from(config: RiskConfig) -> Self {
        Self {
            max_order_amount: config.max_order_amount,
            amount_increment: config.amount_increment,
            blocked_loans: config.blocked_loans.into_iter().collect::<HashSet<_>>(),
        }
    }
}
