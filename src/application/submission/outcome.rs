//! Results of a submission call.

use serde::Serialize;

use crate::domain::{BatchId, InstructId, LoanId, RecordId, ReconcileReport};

/// The first order the risk gate declined.
///
/// Nothing from the batch was logged or submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskRejection {
    pub batch_id: BatchId,
    /// Zero-based position of the declined order within the batch.
    pub index: usize,
    pub loan_id: LoanId,
    /// Orders approved before the declined one.
    pub approved_before: usize,
    /// Total orders in the batch.
    pub batch_size: usize,
    pub gate: &'static str,
}

/// A batch that was logged, submitted, and reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub batch_id: BatchId,
    pub instruct_id: InstructId,
    /// Intent row keys in batch order.
    pub record_ids: Vec<RecordId>,
    pub reconcile: ReconcileReport,
}

impl SubmissionReport {
    /// True when every confirmation resolved exactly one intent row.
    #[must_use]
    pub fn is_fully_reconciled(&self) -> bool {
        self.reconcile.is_fully_matched()
    }
}

/// How a submission call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Reconciled(SubmissionReport),
    RejectedByRisk(RiskRejection),
}

impl SubmissionOutcome {
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::RejectedByRisk(_))
    }

    #[must_use]
    pub const fn report(&self) -> Option<&SubmissionReport> {
        match self {
            Self::Reconciled(report) => Some(report),
            Self::RejectedByRisk(_) => None,
        }
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<&RiskRejection> {
        match self {
            Self::Reconciled(_) => None,
            Self::RejectedByRisk(rejection) => Some(rejection),
        }
    }
}
