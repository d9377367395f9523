//! Handler for the `pending` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::OrderRecord;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::OrderLedger;

#[derive(Tabled)]
struct PendingRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Loan")]
    loan: i64,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Logged")]
    created_at: String,
    #[tabled(rename = "Batch")]
    batch: String,
}

impl From<&OrderRecord> for PendingRow {
    fn from(record: &OrderRecord) -> Self {
        Self {
            id: record.id.get(),
            loan: record.loan_id.get(),
            amount: record.requested_amount.to_string(),
            client: record.client_id.to_string(),
            created_at: record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            batch: record.batch_id.to_string(),
        }
    }
}

/// List intent rows that never received an outcome.
pub async fn execute(config: &Config) -> Result<()> {
    let ledger = bootstrap::open_ledger(config)?;
    let records = ledger.unresolved().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "pending",
            "count": records.len(),
            "orders": records,
        }));
        return Ok(());
    }

    if records.is_empty() {
        output::success("No unresolved orders");
        return Ok(());
    }

    output::section(&format!("{} unresolved order(s)", records.len()));
    let rows: Vec<PendingRow> = records.iter().map(PendingRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    output::note("Apply the marketplace acknowledgment with `noteorder reconcile --file <ack.json>`");
    Ok(())
}
