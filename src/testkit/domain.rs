//! Builders for domain primitives used across tests.
//!
//! Construction helpers panic on invalid input; they exist so tests focus
//! on assertions rather than validation plumbing.

use rust_decimal::Decimal;

use crate::domain::{
    Acknowledgment, ClientId, InstructId, InvestorId, LoanId, Order, OrderConfirmation,
    PortfolioId,
};

/// Create a [`LoanId`].
pub fn loan(id: i64) -> LoanId {
    LoanId::try_new(id).expect("test loan id must be positive")
}

/// Create an [`InvestorId`].
pub fn investor(id: i64) -> InvestorId {
    InvestorId::try_new(id).expect("test investor id must be positive")
}

/// Create a [`ClientId`].
pub fn client(id: &str) -> ClientId {
    ClientId::try_new(id).expect("test client id must not be blank")
}

/// Create an [`Order`] without a portfolio.
pub fn order(loan_id: i64, amount: Decimal) -> Order {
    Order::try_new(loan(loan_id), amount, None).expect("test order must be valid")
}

/// Create an [`Order`] filed under a portfolio.
pub fn order_in_portfolio(loan_id: i64, amount: Decimal, portfolio: i64) -> Order {
    let portfolio = PortfolioId::try_new(portfolio).expect("test portfolio id must be positive");
    Order::try_new(loan(loan_id), amount, Some(portfolio)).expect("test order must be valid")
}

/// Create a confirmation investing the full requested amount.
pub fn confirmation(loan_id: i64, amount: Decimal, statuses: &[&str]) -> OrderConfirmation {
    confirmation_investing(loan_id, amount, amount, statuses)
}

/// Create a confirmation with an explicit invested amount.
pub fn confirmation_investing(
    loan_id: i64,
    requested: Decimal,
    invested: Decimal,
    statuses: &[&str],
) -> OrderConfirmation {
    OrderConfirmation {
        loan_id: loan(loan_id),
        requested_amount: requested,
        invested_amount: invested,
        execution_status: statuses.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// Create an acknowledgment with the given instruct id.
pub fn ack(instruct_id: &str, confirmations: Vec<OrderConfirmation>) -> Acknowledgment {
    Acknowledgment::new(InstructId::from(instruct_id), confirmations)
}

/// Acknowledge every order as fulfilled in full.
pub fn fulfilled_ack(instruct_id: &str, orders: &[Order]) -> Acknowledgment {
    ack(
        instruct_id,
        orders
            .iter()
            .map(|o| confirmation(o.loan_id().get(), o.amount(), &["ORDER_FULFILLED"]))
            .collect(),
    )
}
