//! Scripted [`MarketplaceClient`] for session tests.
//!
//! Each call to `submit_orders` pops the next [`Script`] entry. When the
//! queue is exhausted every order is acknowledged as fulfilled in full.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Acknowledgment, InstructId, InvestorId, OrderConfirmation};
use crate::error::{Error, SubmissionError};
use crate::port::{MarketplaceClient, OrderLedger, OrderRequest};

/// Scripted response for one submission.
#[derive(Debug, Clone)]
pub enum Script {
    /// Return this acknowledgment.
    Acknowledge(Acknowledgment),
    /// Fail as if the marketplace answered with a non-success status.
    Reject { status: u16, body: String },
    /// Fail as if the response body could not be parsed.
    Malformed(String),
}

/// One recorded submission.
#[derive(Debug, Clone)]
pub struct SubmitCall {
    pub investor_id: InvestorId,
    pub orders: Vec<OrderRequest>,
    /// Unresolved ledger rows at the moment of the call, when observing.
    pub unresolved_at_call: Option<usize>,
}

/// A marketplace that replays scripted responses and records calls.
#[derive(Default)]
pub struct ScriptedMarketplace {
    scripts: Mutex<VecDeque<Script>>,
    calls: Mutex<Vec<SubmitCall>>,
    ledger: Option<Arc<dyn OrderLedger>>,
}

impl ScriptedMarketplace {
    /// A marketplace that fulfils every order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    #[must_use]
    pub fn then(self, script: Script) -> Self {
        self.scripts.lock().push_back(script);
        self
    }

    /// Queue an acknowledgment.
    #[must_use]
    pub fn then_acknowledge(self, ack: Acknowledgment) -> Self {
        self.then(Script::Acknowledge(ack))
    }

    /// Count unresolved ledger rows whenever a submission arrives.
    #[must_use]
    pub fn observing(mut self, ledger: Arc<dyn OrderLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Recorded submissions, in call order.
    pub fn calls(&self) -> Vec<SubmitCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn fulfil(orders: &[OrderRequest], sequence: usize) -> Acknowledgment {
        Acknowledgment::new(
            InstructId::new(format!("SCRIPTED-{sequence}")),
            orders
                .iter()
                .map(|o| OrderConfirmation {
                    loan_id: o.loan_id,
                    requested_amount: o.requested_amount,
                    invested_amount: o.requested_amount,
                    execution_status: vec!["ORDER_FULFILLED".to_string()],
                })
                .collect(),
        )
    }
}

#[async_trait]
impl MarketplaceClient for ScriptedMarketplace {
    async fn submit_orders(
        &self,
        investor_id: InvestorId,
        orders: &[OrderRequest],
    ) -> Result<Acknowledgment, Error> {
        let unresolved_at_call = match &self.ledger {
            Some(ledger) => Some(ledger.unresolved().await?.len()),
            None => None,
        };

        let sequence = {
            let mut calls = self.calls.lock();
            calls.push(SubmitCall {
                investor_id,
                orders: orders.to_vec(),
                unresolved_at_call,
            });
            calls.len()
        };

        let script = self.scripts.lock().pop_front();
        match script {
            Some(Script::Acknowledge(ack)) => Ok(ack),
            Some(Script::Reject { status, body }) => {
                Err(SubmissionError::Rejected { status, body }.into())
            }
            Some(Script::Malformed(reason)) => Err(SubmissionError::MalformedResponse(reason).into()),
            None => Ok(Self::fulfil(orders, sequence)),
        }
    }

    fn marketplace_name(&self) -> &'static str {
        "scripted"
    }
}
