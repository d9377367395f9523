//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`marketplace`] - `ScriptedMarketplace`, a [`MarketplaceClient`](crate::port::MarketplaceClient)
//!   that records calls and replays scripted acknowledgments or failures.
//! - [`risk`] - `ScriptedRiskGate`, a [`RiskGate`](crate::port::RiskGate) that
//!   declines configured loans and counts consultations.
//! - [`domain`] - Builders for orders, confirmations, and acknowledgments.

pub mod domain;
pub mod marketplace;
pub mod risk;
