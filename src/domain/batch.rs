//! Lifecycle of one submission batch.
//!
//! ```text
//! Built -> Gated -> LoggedIntent -> Submitted -> Reconciled
//!   \
//!    `-> RejectedByRisk
//! ```
//!
//! `Reconciled` and `RejectedByRisk` are terminal. A batch that fails after
//! `LoggedIntent` simply stops advancing; its rows stay unresolved in the
//! ledger.

use std::fmt;

use serde::Serialize;

use super::error::DomainError;

/// State of a batch within one submission call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    Built,
    Gated,
    LoggedIntent,
    Submitted,
    Reconciled,
    RejectedByRisk,
}

impl BatchState {
    /// Check if a state transition is valid.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Built, Self::Gated)
                | (Self::Built, Self::RejectedByRisk)
                | (Self::Gated, Self::LoggedIntent)
                | (Self::LoggedIntent, Self::Submitted)
                | (Self::Submitted, Self::Reconciled)
        )
    }

    /// Move to `next`, or fail if the lifecycle does not allow it.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidTransition`] for a disallowed move.
    pub fn advance(&mut self, next: Self) -> Result<(), DomainError> {
        if !self.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Reconciled | Self::RejectedByRisk)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Built => "built",
            Self::Gated => "gated",
            Self::LoggedIntent => "logged_intent",
            Self::Submitted => "submitted",
            Self::Reconciled => "reconciled",
            Self::RejectedByRisk => "rejected_by_risk",
        }
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BatchState; 6] = [
        BatchState::Built,
        BatchState::Gated,
        BatchState::LoggedIntent,
        BatchState::Submitted,
        BatchState::Reconciled,
        BatchState::RejectedByRisk,
    ];

    #[test]
    fn happy_path_advances_to_reconciled() {
        let mut state = BatchState::Built;
        for next in [
            BatchState::Gated,
            BatchState::LoggedIntent,
            BatchState::Submitted,
            BatchState::Reconciled,
        ] {
            state.advance(next).unwrap();
        }
        assert_eq!(state, BatchState::Reconciled);
        assert!(state.is_terminal());
    }

    #[test]
    fn rejection_only_reachable_before_gating() {
        assert!(BatchState::Built.can_transition_to(BatchState::RejectedByRisk));
        assert!(!BatchState::Gated.can_transition_to(BatchState::RejectedByRisk));
        assert!(!BatchState::LoggedIntent.can_transition_to(BatchState::RejectedByRisk));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for from in [BatchState::Reconciled, BatchState::RejectedByRisk] {
            for to in ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn skipping_intent_log_is_rejected() {
        let mut state = BatchState::Gated;
        let err = state.advance(BatchState::Submitted).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: BatchState::Gated,
                to: BatchState::Submitted,
            }
        );
        assert_eq!(state, BatchState::Gated);
    }
}
