//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! ```
//! use noteorder::domain::error::DomainError;
//! use noteorder::domain::id::LoanId;
//! use noteorder::domain::order::Order;
//! use rust_decimal_macros::dec;
//!
//! let loan = LoanId::try_new(12345).unwrap();
//! let result = Order::try_new(loan, dec!(0), None);
//!
//! assert!(matches!(result, Err(DomainError::NonPositiveAmount { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::batch::BatchState;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Order amounts must be strictly positive.
    #[error("amount must be greater than 0, got {amount}")]
    NonPositiveAmount {
        /// The invalid amount that was provided.
        amount: Decimal,
    },

    /// Loan identifiers are positive integers.
    #[error("loan id must be positive, got {id}")]
    NonPositiveLoanId {
        /// The invalid identifier.
        id: i64,
    },

    /// Portfolio identifiers are positive integers.
    #[error("portfolio id must be positive, got {id}")]
    NonPositivePortfolioId {
        /// The invalid identifier.
        id: i64,
    },

    /// Investor identifiers are positive integers.
    #[error("investor id must be positive, got {id}")]
    NonPositiveInvestorId {
        /// The invalid identifier.
        id: i64,
    },

    /// Client identifiers cannot be blank.
    #[error("client id cannot be empty")]
    EmptyClientId,

    /// A submission needs at least one order.
    #[error("order batch cannot be empty")]
    EmptyBatch,

    /// A batch attempted a lifecycle transition that is not allowed.
    #[error("invalid batch transition from {from} to {to}")]
    InvalidTransition {
        /// State the batch was in.
        from: BatchState,
        /// State that was requested.
        to: BatchState,
    },
}
