//! Composition root: builds adapters from configuration and wires them
//! into an [`OrderSubmissionSession`].

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::lendingclub::LendingClubClient;
use crate::adapter::outbound::risk::{LimitRiskGate, RiskLimits};
use crate::adapter::outbound::sqlite::{self, SqliteOrderLedger};
use crate::application::OrderSubmissionSession;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{MarketplaceClient, OrderLedger, RiskGate};

/// Open the ledger database and apply pending migrations.
///
/// # Errors
/// Returns a ledger error if the database cannot be opened or migrated.
pub fn open_ledger(config: &Config) -> Result<Arc<SqliteOrderLedger>> {
    let pool = sqlite::open(config.database_url())?;
    Ok(Arc::new(SqliteOrderLedger::new(pool)))
}

/// Build the risk gate from `[risk]`.
#[must_use]
pub fn build_risk_gate(config: &Config) -> Arc<LimitRiskGate> {
    Arc::new(LimitRiskGate::new(RiskLimits::from(config.risk.clone())))
}

/// Build the marketplace client from `[marketplace]` and `LENDING_API_KEY`.
///
/// # Errors
/// Returns a submission error if the API key is not set.
pub fn build_marketplace(config: &Config) -> Result<Arc<LendingClubClient>> {
    Ok(Arc::new(LendingClubClient::from_env(&config.marketplace)?))
}

/// Wire a session from configuration.
///
/// # Errors
/// Returns an error if the ledger cannot be opened or credentials are missing.
pub fn build_session(config: &Config) -> Result<OrderSubmissionSession> {
    let marketplace: Arc<dyn MarketplaceClient> = build_marketplace(config)?;
    let ledger: Arc<dyn OrderLedger> = open_ledger(config)?;
    let risk: Arc<dyn RiskGate> = build_risk_gate(config);

    info!(
        database = %config.database_url(),
        marketplace = marketplace.marketplace_name(),
        risk = risk.name(),
        "Submission session ready"
    );

    Ok(OrderSubmissionSession::new(risk, marketplace, ledger))
}
