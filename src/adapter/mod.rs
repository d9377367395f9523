//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving side: the command-line interface
//! - [`outbound`] - Driven side: ledger, marketplace and risk gate

pub mod inbound;
pub mod outbound;
