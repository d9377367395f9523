//! Marketplace-agnostic domain logic.

pub mod acknowledgment;
pub mod batch;
pub mod error;
pub mod execution;
pub mod id;
pub mod order;
pub mod record;

pub use acknowledgment::{Acknowledgment, OrderConfirmation};
pub use batch::BatchState;
pub use error::DomainError;
pub use execution::{decode, DecodeError, ExecutionCode, ExecutionStatus};
pub use id::{BatchId, ClientId, InstructId, InvestorId, LoanId, PortfolioId, RecordId};
pub use order::Order;
pub use record::{ConfirmationMatch, OrderRecord, ReconcileReport};
