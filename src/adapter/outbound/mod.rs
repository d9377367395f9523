//! Outbound adapters (driven side).

pub mod lendingclub;
pub mod risk;
pub mod sqlite;
