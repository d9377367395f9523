//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the submission session and the systems it
//! orchestrates but does not own.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │  OrderSubmissionSession │
//!                    └────────────┬────────────┘
//!          ┌──────────────────────┼──────────────────────┐
//!          ▼                      ▼                      ▼
//!    ┌──────────┐         ┌──────────────┐        ┌────────────┐
//!    │ RiskGate │         │ OrderLedger  │        │Marketplace │
//!    └──────────┘         └──────────────┘        └────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`RiskGate`] - Per-order approval decision
//! - [`OrderLedger`] - Durable intent/outcome records
//! - [`MarketplaceClient`] - Order submission

pub mod ledger;
pub mod marketplace;
pub mod risk;

pub use ledger::OrderLedger;
pub use marketplace::{MarketplaceClient, OrderRequest};
pub use risk::RiskGate;
