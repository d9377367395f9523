//! Handler for the `submit` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::SubmitArgs;
use crate::adapter::inbound::cli::output;
use crate::application::{SubmissionOutcome, SubmissionReport};
use crate::domain::{ClientId, DomainError, InvestorId};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Run one submission session. Returns `false` if risk declined the batch.
pub async fn execute(config: &Config, args: &SubmitArgs) -> Result<bool> {
    let investor_id = InvestorId::try_new(args.investor)?;
    let client_id = ClientId::try_new(args.client.clone())?;
    let orders = args.orders()?;
    if orders.is_empty() {
        return Err(DomainError::EmptyBatch.into());
    }

    let session = bootstrap::build_session(config)?;
    let outcome = session
        .submit_orders(investor_id, &client_id, &orders)
        .await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "submit",
            "result": outcome,
        }));
        return Ok(!outcome.is_rejected());
    }

    match &outcome {
        SubmissionOutcome::Reconciled(report) => print_report(report),
        SubmissionOutcome::RejectedByRisk(rejection) => {
            output::warning(&format!(
                "Batch rejected by {} gate at order {} (loan {}); {} of {} approved before it",
                rejection.gate,
                rejection.index + 1,
                rejection.loan_id,
                rejection.approved_before,
                rejection.batch_size
            ));
            output::note("Nothing was logged or submitted");
        }
    }
    Ok(!outcome.is_rejected())
}

fn print_report(report: &SubmissionReport) {
    output::success("Batch submitted and reconciled");
    output::field("Batch", &report.batch_id);
    output::field("Instruct id", output::highlight(&report.instruct_id));
    for matched in &report.reconcile.matches {
        let code = if matched.execution_code.is_fulfilled() {
            output::positive(matched.execution_code)
        } else {
            output::negative(matched.execution_code)
        };
        output::field(&format!("Loan {}", matched.loan_id), code);
    }
    for unmatched in report.reconcile.unmatched() {
        output::warning(&format!(
            "loan {} amount {} matched no intent row",
            unmatched.loan_id, unmatched.requested_amount
        ));
    }
}
