//! Client-side purchase order for a fractional loan note.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{LoanId, PortfolioId};

/// A request to buy `amount` worth of notes in one loan.
///
/// Construction goes through [`Order::try_new`], so every `Order` in the
/// system has a strictly positive amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOrder")]
pub struct Order {
    loan_id: LoanId,
    amount: Decimal,
    portfolio_id: Option<PortfolioId>,
}

impl Order {
    /// Create a validated order.
    ///
    /// # Errors
    /// Returns [`DomainError::NonPositiveAmount`] if `amount <= 0`.
    pub fn try_new(
        loan_id: LoanId,
        amount: Decimal,
        portfolio_id: Option<PortfolioId>,
    ) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount { amount });
        }
        Ok(Self {
            loan_id,
            amount,
            portfolio_id,
        })
    }

    #[must_use]
    pub const fn loan_id(&self) -> LoanId {
        self.loan_id
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub const fn portfolio_id(&self) -> Option<PortfolioId> {
        self.portfolio_id
    }
}

#[derive(Deserialize)]
struct RawOrder {
    loan_id: LoanId,
    amount: Decimal,
    #[serde(default)]
    portfolio_id: Option<PortfolioId>,
}

impl TryFrom<RawOrder> for Order {
    type Error = DomainError;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        Self::try_new(raw.loan_id, raw.amount, raw.portfolio_id)
    }
}
