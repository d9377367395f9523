//! Marketplace acknowledgment of a submitted order batch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::execution::{self, DecodeError, ExecutionCode};
use super::id::{InstructId, LoanId};

/// Outcome of one order within an acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub loan_id: LoanId,
    pub requested_amount: Decimal,
    pub invested_amount: Decimal,
    /// Raw marketplace status names, decoded with [`execution::decode`].
    pub execution_status: Vec<String>,
}

impl OrderConfirmation {
    /// Decode the status names into a combined execution code.
    ///
    /// # Errors
    /// Returns an error if any status name is unknown.
    pub fn execution_code(&self) -> Result<ExecutionCode, DecodeError> {
        execution::decode(&self.execution_status)
    }
}

/// Acknowledgment returned for one submission call.
///
/// All confirmations share the batch-level instruct id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    pub instruct_id: InstructId,
    pub confirmations: Vec<OrderConfirmation>,
}

impl Acknowledgment {
    #[must_use]
    pub fn new(instruct_id: impl Into<InstructId>, confirmations: Vec<OrderConfirmation>) -> Self {
        Self {
            instruct_id: instruct_id.into(),
            confirmations,
        }
    }

    /// Sum of invested amounts across all confirmations.
    #[must_use]
    pub fn total_invested(&self) -> Decimal {
        self.confirmations.iter().map(|c| c.invested_amount).sum()
    }
}
