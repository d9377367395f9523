//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod submission;

pub use submission::{OrderSubmissionSession, RiskRejection, SubmissionOutcome, SubmissionReport};
