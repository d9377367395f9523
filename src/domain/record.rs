//! Ledger rows: the persisted intent and outcome of each order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::execution::ExecutionCode;
use super::id::{BatchId, ClientId, InstructId, LoanId, PortfolioId, RecordId};

/// One persisted order row.
///
/// Created with every outcome field empty when intent is logged, then filled
/// exactly once when the matching confirmation is reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    pub id: RecordId,
    pub batch_id: BatchId,
    pub loan_id: LoanId,
    pub client_id: ClientId,
    pub requested_amount: Decimal,
    pub portfolio_id: Option<PortfolioId>,
    pub invested_amount: Option<Decimal>,
    pub external_order_id: Option<InstructId>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub execution_code: Option<ExecutionCode>,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Return true once an outcome has been recorded for this row.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.execution_code.is_some()
    }
}

/// Result of reconciling a single confirmation against the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationMatch {
    pub loan_id: LoanId,
    pub requested_amount: Decimal,
    pub execution_code: ExecutionCode,
    /// Row that was resolved, if any.
    pub record_id: Option<RecordId>,
    /// Rows touched by the update statement (0 or 1).
    pub rows_affected: usize,
}

/// Outcome of recording one acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub instruct_id: InstructId,
    pub matches: Vec<ConfirmationMatch>,
}

impl ReconcileReport {
    /// Number of rows resolved by this acknowledgment.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.matches.iter().map(|m| m.rows_affected).sum()
    }

    /// Confirmations that matched no unresolved intent row.
    pub fn unmatched(&self) -> impl Iterator<Item = &ConfirmationMatch> {
        self.matches.iter().filter(|m| m.rows_affected == 0)
    }

    #[must_use]
    pub fn is_fully_matched(&self) -> bool {
        self.unmatched().next().is_none()
    }
}
