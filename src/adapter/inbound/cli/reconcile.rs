//! Handler for the `reconcile` command.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::lendingclub::dto::SubmitOrdersResponse;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::OrderLedger;

/// Apply a saved acknowledgment to unresolved intent rows.
pub async fn execute(config: &Config, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)?;
    let response: SubmitOrdersResponse = serde_json::from_str(&raw)?;
    let ack = response.into_acknowledgment()?;

    let ledger = bootstrap::open_ledger(config)?;
    let report = ledger.record_outcome(&ack, None).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "reconcile",
            "report": report,
        }));
        return Ok(());
    }

    output::field("Instruct id", &report.instruct_id);
    output::field("Confirmations", report.matches.len());
    output::field("Resolved", output::positive(report.resolved()));
    for unmatched in report.unmatched() {
        output::warning(&format!(
            "loan {} amount {} matched no unresolved order",
            unmatched.loan_id, unmatched.requested_amount
        ));
    }
    Ok(())
}
