//! LendingClub wire types for order submission.
//!
//! The investor API exchanges amounts as JSON numbers, so amounts cross
//! this boundary as floats and are converted to `Decimal` on arrival.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Acknowledgment, InstructId, LoanId, OrderConfirmation};
use crate::error::SubmissionError;
use crate::port::OrderRequest;

/// Body of `POST .../accounts/{investorId}/orders`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOrdersBody {
    /// Investor account id, repeated in the body.
    pub aid: i64,
    pub orders: Vec<OrderEntry>,
}

impl SubmitOrdersBody {
    #[must_use]
    pub fn new(aid: i64, requests: &[OrderRequest]) -> Self {
        Self {
            aid,
            orders: requests.iter().map(OrderEntry::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEntry {
    pub loan_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub requested_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<i64>,
}

impl From<&OrderRequest> for OrderEntry {
    fn from(request: &OrderRequest) -> Self {
        Self {
            loan_id: request.loan_id.get(),
            requested_amount: request.requested_amount,
            portfolio_id: request.portfolio_id.map(|p| p.get()),
        }
    }
}

/// The marketplace reports the instruct id as a number; some tooling
/// re-serializes it as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireInstructId {
    Number(i64),
    Text(String),
}

impl From<WireInstructId> for InstructId {
    fn from(wire: WireInstructId) -> Self {
        match wire {
            WireInstructId::Number(n) => InstructId::new(n.to_string()),
            WireInstructId::Text(s) => InstructId::new(s),
        }
    }
}

/// Order acknowledgment returned by the marketplace.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrdersResponse {
    pub order_instruct_id: Option<WireInstructId>,
    #[serde(default)]
    pub order_confirmations: Vec<ConfirmationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationEntry {
    pub loan_id: i64,
    pub requested_amount: Decimal,
    #[serde(default)]
    pub invested_amount: Decimal,
    #[serde(default)]
    pub execution_status: Vec<String>,
}

impl SubmitOrdersResponse {
    /// Convert into the domain acknowledgment.
    ///
    /// # Errors
    /// Returns `SubmissionError::MalformedResponse` when the instruct id is
    /// missing or a confirmation names an invalid loan id.
    pub fn into_acknowledgment(self) -> Result<Acknowledgment, SubmissionError> {
        let instruct_id = self.order_instruct_id.ok_or_else(|| {
            SubmissionError::MalformedResponse("missing orderInstructId".into())
        })?;

        let confirmations = self
            .order_confirmations
            .into_iter()
            .map(|entry| {
                let loan_id = LoanId::try_new(entry.loan_id)
                    .map_err(|e| SubmissionError::MalformedResponse(e.to_string()))?;
                Ok(OrderConfirmation {
                    loan_id,
                    requested_amount: entry.requested_amount,
                    invested_amount: entry.invested_amount,
                    execution_status: entry.execution_status,
                })
            })
            .collect::<Result<Vec<_>, SubmissionError>>()?;

        Ok(Acknowledgment::new(InstructId::from(instruct_id), confirmations))
    }
}
