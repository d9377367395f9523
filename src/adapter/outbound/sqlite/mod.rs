//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed [`OrderLedger`](crate::port::OrderLedger)
//! implementation using Diesel ORM.

pub mod database;
pub mod ledger;

pub use database::connection::{create_pool, create_pool_with_size, open, run_migrations, DbPool};
pub use ledger::SqliteOrderLedger;
