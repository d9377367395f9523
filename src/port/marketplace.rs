//! Marketplace port for order submission.
//!
//! The primary outbound integration point: hand a built order pack to the
//! lending marketplace and receive its acknowledgment.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Acknowledgment, InvestorId, LoanId, Order, PortfolioId};
use crate::error::Error;

/// Wire representation of one order in a submission pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// The loan to buy notes in.
    pub loan_id: LoanId,
    /// Amount to invest.
    pub requested_amount: Decimal,
    /// Portfolio to file the note under, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<PortfolioId>,
}

impl From<&Order> for OrderRequest {
    fn from(order: &Order) -> Self {
        Self {
            loan_id: order.loan_id(),
            requested_amount: order.amount(),
            portfolio_id: order.portfolio_id(),
        }
    }
}

/// Client for submitting order packs to the marketplace.
///
/// A returned `Err` means no usable acknowledgment exists. An acknowledgment
/// whose confirmations all report rejection flags is still `Ok`.
#[async_trait]
pub trait MarketplaceClient: Send + Sync {
    /// Submit a pack of orders on behalf of an investor account.
    async fn submit_orders(
        &self,
        investor_id: InvestorId,
        orders: &[OrderRequest],
    ) -> Result<Acknowledgment, Error>;

    /// Get the marketplace name for logging/debugging.
    fn marketplace_name(&self) -> &'static str;
}
