//! Order submission use case.
//!
//! [`OrderSubmissionSession`] drives one batch through
//! gate, intent log, submit and outcome log. The result of a call is a
//! [`SubmissionOutcome`].

mod outcome;
mod session;

pub use outcome::{RiskRejection, SubmissionOutcome, SubmissionReport};
pub use session::OrderSubmissionSession;
