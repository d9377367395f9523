//! Limit-based risk gate.
//!
//! A stateless per-order check used when the process is wired from
//! configuration. Any other [`RiskGate`] can be injected instead.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{LoanId, Order};
use crate::port::RiskGate;

/// Static limits applied to every order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskLimits {
    /// Largest amount a single order may request.
    pub max_order_amount: Decimal,
    /// Amounts must be a whole multiple of this increment.
    pub amount_increment: Decimal,
    /// Loans that may never be ordered.
    pub blocked_loans: HashSet<LoanId>,
}

/// Why [`LimitRiskGate`] declined an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitBreach {
    AboveMaximum,
    OffIncrement,
    BlockedLoan,
}

impl LimitBreach {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AboveMaximum => "above_maximum",
            Self::OffIncrement => "off_increment",
            Self::BlockedLoan => "blocked_loan",
        }
    }
}

/// Risk gate enforcing [`RiskLimits`].
pub struct LimitRiskGate {
    limits: RiskLimits,
}

impl LimitRiskGate {
    #[must_use]
    pub const fn new(limits: RiskLimits) -> Self {
        Self { limits }
    }

    /// Return the first limit the order breaks, if any.
    #[must_use]
    pub fn check(&self, order: &Order) -> Option<LimitBreach> {
        if self.limits.blocked_loans.contains(&order.loan_id()) {
            return Some(LimitBreach::BlockedLoan);
        }
        if order.amount() > self.limits.max_order_amount {
            return Some(LimitBreach::AboveMaximum);
        }
        if !self.limits.amount_increment.is_zero()
            && !(order.amount() % self.limits.amount_increment).is_zero()
        {
            return Some(LimitBreach::OffIncrement);
        }
        None
    }
}

impl RiskGate for LimitRiskGate {
    fn approve(&self, order: &Order) -> bool {
        match self.check(order) {
            None => true,
            Some(breach) => {
                warn!(
                    loan_id = %order.loan_id(),
                    amount = %order.amount(),
                    max_order_amount = %self.limits.max_order_amount,
                    amount_increment = %self.limits.amount_increment,
                    breach = breach.as_str(),
                    "Order declined by risk limits"
                );
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "limits"
    }
}
