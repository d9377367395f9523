//! Scripted [`RiskGate`] for session tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::domain::{LoanId, Order};
use crate::port::RiskGate;

/// A risk gate that declines a fixed set of loans and records every
/// consultation in order.
#[derive(Default)]
pub struct ScriptedRiskGate {
    declined: HashSet<LoanId>,
    calls: AtomicUsize,
    seen: Mutex<Vec<LoanId>>,
}

impl ScriptedRiskGate {
    /// A gate that approves everything.
    pub fn approving() -> Self {
        Self::default()
    }

    /// A gate that declines the given loans and approves the rest.
    pub fn declining(loans: impl IntoIterator<Item = LoanId>) -> Self {
        Self {
            declined: loans.into_iter().collect(),
            ..Self::default()
        }
    }

    /// How many times `approve` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Loans the gate was consulted about, in call order.
    pub fn seen(&self) -> Vec<LoanId> {
        self.seen.lock().clone()
    }
}

impl RiskGate for ScriptedRiskGate {
    fn approve(&self, order: &Order) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(order.loan_id());
        !self.declined.contains(&order.loan_id())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
