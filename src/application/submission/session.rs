//! Risk-gated, two-phase-logged order submission.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::outcome::{RiskRejection, SubmissionOutcome, SubmissionReport};
use crate::domain::{
    Acknowledgment, BatchId, BatchState, ClientId, DomainError, InvestorId, Order,
    ReconcileReport,
};
use crate::error::Result;
use crate::port::{MarketplaceClient, OrderLedger, OrderRequest, RiskGate};

/// Submits order batches on behalf of investors.
///
/// Each call runs one batch through these steps, in order:
///
/// 1. every order is turned into a pack entry and shown to the risk gate;
///    the first decline abandons the batch with nothing logged or sent
/// 2. one intent row per order is committed to the ledger
/// 3. the pack is submitted to the marketplace
/// 4. the acknowledgment is written back onto the batch's intent rows
///
/// A failure after step 2 leaves the intent rows unresolved; they can be
/// settled later with [`reconcile`](Self::reconcile). There is no retry.
pub struct OrderSubmissionSession {
    risk: Arc<dyn RiskGate>,
    marketplace: Arc<dyn MarketplaceClient>,
    ledger: Arc<dyn OrderLedger>,
}

impl OrderSubmissionSession {
    pub fn new(
        risk: Arc<dyn RiskGate>,
        marketplace: Arc<dyn MarketplaceClient>,
        ledger: Arc<dyn OrderLedger>,
    ) -> Self {
        Self {
            risk,
            marketplace,
            ledger,
        }
    }

    /// Submit a single order as a one-element batch.
    ///
    /// # Errors
    /// See [`submit_orders`](Self::submit_orders).
    pub async fn submit_order(
        &self,
        investor_id: InvestorId,
        client_id: &ClientId,
        order: Order,
    ) -> Result<SubmissionOutcome> {
        self.submit_orders(investor_id, client_id, std::slice::from_ref(&order))
            .await
    }

    /// Submit a batch of orders.
    ///
    /// Risk rejection is reported as [`SubmissionOutcome::RejectedByRisk`],
    /// not as an error.
    ///
    /// # Errors
    /// - [`DomainError::EmptyBatch`] if `orders` is empty
    /// - a ledger error if either log step fails
    /// - a submission error if the marketplace call fails
    /// - a decode error if the acknowledgment names an unknown status
    pub async fn submit_orders(
        &self,
        investor_id: InvestorId,
        client_id: &ClientId,
        orders: &[Order],
    ) -> Result<SubmissionOutcome> {
        if orders.is_empty() {
            return Err(DomainError::EmptyBatch.into());
        }

        let batch_id = BatchId::generate();
        let mut state = BatchState::Built;

        let mut pack: Vec<OrderRequest> = Vec::with_capacity(orders.len());
        for (index, order) in orders.iter().enumerate() {
            pack.push(OrderRequest::from(order));
            if !self.risk.approve(order) {
                state.advance(BatchState::RejectedByRisk)?;
                let rejection = RiskRejection {
                    batch_id,
                    index,
                    loan_id: order.loan_id(),
                    approved_before: index,
                    batch_size: orders.len(),
                    gate: self.risk.name(),
                };
                warn!(
                    batch_id = %batch_id,
                    investor_id = %investor_id,
                    loan_id = %rejection.loan_id,
                    index,
                    approved_before = rejection.approved_before,
                    batch_size = rejection.batch_size,
                    gate = rejection.gate,
                    "Batch rejected by risk gate"
                );
                return Ok(SubmissionOutcome::RejectedByRisk(rejection));
            }
        }
        state.advance(BatchState::Gated)?;
        info!(
            batch_id = %batch_id,
            investor_id = %investor_id,
            client_id = %client_id,
            orders = pack.len(),
            "Batch passed risk gate"
        );

        let record_ids = self
            .ledger
            .record_intent(batch_id, client_id, &pack)
            .await?;
        state.advance(BatchState::LoggedIntent)?;
        info!(batch_id = %batch_id, rows = record_ids.len(), "Intent logged");

        let ack = self
            .marketplace
            .submit_orders(investor_id, &pack)
            .await
            .map_err(|e| {
                warn!(
                    batch_id = %batch_id,
                    marketplace = self.marketplace.marketplace_name(),
                    error = %e,
                    "Submission failed; intent rows left unresolved"
                );
                e
            })?;
        state.advance(BatchState::Submitted)?;
        info!(
            batch_id = %batch_id,
            instruct_id = %ack.instruct_id,
            confirmations = ack.confirmations.len(),
            "Batch submitted"
        );

        let reconcile = self
            .ledger
            .record_outcome(&ack, Some(batch_id))
            .await
            .map_err(|e| {
                error!(
                    batch_id = %batch_id,
                    instruct_id = %ack.instruct_id,
                    error = %e,
                    "Marketplace accepted batch but outcome was not recorded"
                );
                e
            })?;
        state.advance(BatchState::Reconciled)?;
        info!(
            batch_id = %batch_id,
            instruct_id = %ack.instruct_id,
            resolved = reconcile.resolved(),
            unmatched = reconcile.unmatched().count(),
            "Batch reconciled"
        );
        debug!(batch_id = %batch_id, state = %state, "Batch finished");

        Ok(SubmissionOutcome::Reconciled(SubmissionReport {
            batch_id,
            instruct_id: ack.instruct_id.clone(),
            record_ids,
            reconcile,
        }))
    }

    /// Apply an acknowledgment obtained outside a submission call.
    ///
    /// Matches on `(loan id, requested amount)` across all batches, so at
    /// most one unresolved row per pair should exist when this is used.
    ///
    /// # Errors
    /// Returns a decode error for unknown status names or a ledger error.
    pub async fn reconcile(&self, ack: &Acknowledgment) -> Result<ReconcileReport> {
        let report = self.ledger.record_outcome(ack, None).await?;
        info!(
            instruct_id = %report.instruct_id,
            resolved = report.resolved(),
            "Manual reconciliation applied"
        );
        Ok(report)
    }
}
