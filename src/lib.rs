//! Noteorder - risk-gated order submission for fractional loan notes.
//!
//! Orders for notes in marketplace loans are screened by a risk gate,
//! logged as intent rows in a durable ledger, submitted to the marketplace,
//! and reconciled against the marketplace acknowledgment.
//!
//! # Architecture
//!
//! - **`domain`** - Orders, identifiers, the execution-status bitmask codec,
//!   ledger records and the batch state machine
//! - **`port`** - Traits for the risk gate, the marketplace and the ledger
//! - **`application`** - `OrderSubmissionSession`, the submission use case
//! - **`adapter`** - SQLite ledger, LendingClub client, limit-based risk
//!   gate and the CLI
//! - **`infrastructure`** - Configuration, logging and wiring
//!
//! # Example
//!
//! ```no_run
//! use noteorder::domain::execution::decode;
//!
//! let code = decode(["ORDER_FULFILLED", "REQUESTED_AMNT_ROUNDED"]).unwrap();
//! assert_eq!(code.bits(), 17);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
