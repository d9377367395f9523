//! Execution outcome flags reported by the marketplace.
//!
//! A single order confirmation may carry several simultaneous outcomes (for
//! example a rounded amount that was still fulfilled). Each outcome is a
//! distinct power of two, so any combination folds into one [`ExecutionCode`].
//!
//! ```
//! use noteorder::domain::execution::{decode, ExecutionStatus};
//!
//! let code = decode(["ORDER_FULFILLED", "REQUESTED_AMNT_ROUNDED"]).unwrap();
//! assert_eq!(code.bits(), 17);
//! assert!(code.contains(ExecutionStatus::RequestedAmountRounded));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to map a marketplace status name onto a known flag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognized execution status '{name}'")]
    UnrecognizedStatus { name: String },
}

/// One outcome flag of an order confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    Fulfilled,
    LoanAmountExceeded,
    NotInFunding,
    RequestedAmountLow,
    RequestedAmountRounded,
    AugmentedByMerge,
    EliminatedByMerge,
    InsufficientCash,
    NotAnInvestor,
    NotAValidInvestment,
    NoteAddedToPortfolio,
    NotAValidPortfolio,
    ErrorAddingNote,
    SystemBusy,
    UnknownError,
}

/// Wire name and bit value for every flag. Names match the marketplace API.
const STATUS_TABLE: [(ExecutionStatus, &str, u32); 15] = [
    (ExecutionStatus::Fulfilled, "ORDER_FULFILLED", 1),
    (ExecutionStatus::LoanAmountExceeded, "LOAN_AMNT_EXCEEDED", 1 << 1),
    (ExecutionStatus::NotInFunding, "NOT_AN_INFUNDING_LOAN", 1 << 2),
    (ExecutionStatus::RequestedAmountLow, "REQUESTED_AMNT_LOW", 1 << 3),
    (ExecutionStatus::RequestedAmountRounded, "REQUESTED_AMNT_ROUNDED", 1 << 4),
    (ExecutionStatus::AugmentedByMerge, "AUGMENTED_BY_MERGE", 1 << 5),
    (ExecutionStatus::EliminatedByMerge, "ELIM_BY_MERGE", 1 << 6),
    (ExecutionStatus::InsufficientCash, "INSUFFICIENT_CASH", 1 << 7),
    (ExecutionStatus::NotAnInvestor, "NOT_AN_INVESTOR", 1 << 8),
    (ExecutionStatus::NotAValidInvestment, "NOT_A_VALID_INVESTMENT", 1 << 9),
    (ExecutionStatus::NoteAddedToPortfolio, "NOTE_ADDED_TO_PORTFOLIO", 1 << 10),
    (ExecutionStatus::NotAValidPortfolio, "NOT_A_VALID_PORTFOLIO", 1 << 11),
    (ExecutionStatus::ErrorAddingNote, "ERROR_ADDING_NOTE_TO_PORTFOLIO", 1 << 12),
    (ExecutionStatus::SystemBusy, "SYSTEM_BUSY", 1 << 13),
    (ExecutionStatus::UnknownError, "UNKNOWN_ERROR", 1 << 14),
];

impl ExecutionStatus {
    /// Every flag, in ascending bit order.
    pub const ALL: [ExecutionStatus; 15] = [
        Self::Fulfilled,
        Self::LoanAmountExceeded,
        Self::NotInFunding,
        Self::RequestedAmountLow,
        Self::RequestedAmountRounded,
        Self::AugmentedByMerge,
        Self::EliminatedByMerge,
        Self::InsufficientCash,
        Self::NotAnInvestor,
        Self::NotAValidInvestment,
        Self::NoteAddedToPortfolio,
        Self::NotAValidPortfolio,
        Self::ErrorAddingNote,
        Self::SystemBusy,
        Self::UnknownError,
    ];

    fn entry(self) -> &'static (ExecutionStatus, &'static str, u32) {
        // The table is indexed by declaration order.
        &STATUS_TABLE[self as usize]
    }

    /// The marketplace wire name of this flag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.entry().1
    }

    /// The single-bit value of this flag.
    #[must_use]
    pub fn bit(self) -> u32 {
        self.entry().2
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STATUS_TABLE
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(status, _, _)| *status)
            .ok_or_else(|| DecodeError::UnrecognizedStatus {
                name: s.to_string(),
            })
    }
}

/// Combined bitmask of every outcome reported for one confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionCode(u32);

impl ExecutionCode {
    /// The code with no flag set.
    pub const EMPTY: Self = Self(0);

    /// Wrap raw bits as stored in the ledger.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn contains(self, status: ExecutionStatus) -> bool {
        self.0 & status.bit() != 0
    }

    /// Return whether the marketplace fulfilled the order (possibly partially).
    #[must_use]
    pub fn is_fulfilled(self) -> bool {
        self.contains(ExecutionStatus::Fulfilled)
    }

    /// Decompose the code back into its flags, in ascending bit order.
    #[must_use]
    pub fn flags(self) -> Vec<ExecutionStatus> {
        ExecutionStatus::ALL
            .into_iter()
            .filter(|status| self.contains(*status))
            .collect()
    }
}

impl std::ops::BitOr<ExecutionStatus> for ExecutionCode {
    type Output = Self;

    fn bitor(self, rhs: ExecutionStatus) -> Self {
        Self(self.0 | rhs.bit())
    }
}

impl From<ExecutionStatus> for ExecutionCode {
    fn from(status: ExecutionStatus) -> Self {
        Self(status.bit())
    }
}

impl fmt::Display for ExecutionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let names: Vec<&str> = self.flags().into_iter().map(ExecutionStatus::as_str).collect();
        f.write_str(&names.join("|"))
    }
}

/// Fold a list of marketplace status names into one [`ExecutionCode`].
///
/// An empty list yields [`ExecutionCode::EMPTY`].
///
/// # Errors
/// Returns [`DecodeError::UnrecognizedStatus`] for the first name with no
/// known flag; unknown names are never dropped.
pub fn decode<I, S>(names: I) -> Result<ExecutionCode, DecodeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .try_fold(ExecutionCode::EMPTY, |code, name| {
            Ok(code | name.as_ref().parse::<ExecutionStatus>()?)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_variant_order() {
        for (idx, status) in ExecutionStatus::ALL.iter().enumerate() {
            assert_eq!(STATUS_TABLE[idx].0, *status);
            assert_eq!(status.bit(), 1 << idx);
        }
    }

    #[test]
    fn every_name_round_trips() {
        for status in ExecutionStatus::ALL {
            assert_eq!(status.as_str().parse::<ExecutionStatus>().unwrap(), status);
        }
    }

    #[test]
    fn bits_are_distinct() {
        let combined = ExecutionStatus::ALL
            .iter()
            .fold(0u32, |acc, status| {
                assert_eq!(acc & status.bit(), 0);
                acc | status.bit()
            });
        assert_eq!(combined, (1 << 15) - 1);
    }

    #[test]
    fn decode_single_flag() {
        assert_eq!(decode(["ORDER_FULFILLED"]).unwrap().bits(), 1);
    }

    #[test]
    fn decode_two_flags() {
        let code = decode(["ORDER_FULFILLED", "REQUESTED_AMNT_ROUNDED"]).unwrap();
        assert_eq!(code.bits(), 17);
        assert!(code.is_fulfilled());
    }

    #[test]
    fn decode_empty_is_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(decode(empty).unwrap(), ExecutionCode::EMPTY);
    }

    #[test]
    fn decode_rejects_unknown_name() {
        let err = decode(["ORDER_FULFILLED", "ORDER_LOST"]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnrecognizedStatus {
                name: "ORDER_LOST".into()
            }
        );
    }

    #[test]
    fn unknown_name_fails_at_any_position() {
        for names in [
            vec!["ORDER_LOST", "ORDER_FULFILLED"],
            vec!["ORDER_FULFILLED", "ORDER_LOST", "SYSTEM_BUSY"],
            vec!["ORDER_LOST"],
        ] {
            assert_eq!(
                decode(&names).unwrap_err(),
                DecodeError::UnrecognizedStatus {
                    name: "ORDER_LOST".into()
                }
            );
        }
    }

    #[test]
    fn decode_is_case_sensitive() {
        assert!(decode(["order_fulfilled"]).is_err());
    }

    #[test]
    fn duplicate_names_fold_once() {
        assert_eq!(decode(["SYSTEM_BUSY", "SYSTEM_BUSY"]).unwrap().bits(), 8192);
    }

    #[test]
    fn display_lists_flag_names() {
        let code = ExecutionCode::from_bits(17);
        assert_eq!(code.to_string(), "ORDER_FULFILLED|REQUESTED_AMNT_ROUNDED");
        assert_eq!(ExecutionCode::EMPTY.to_string(), "NONE");
    }

    #[test]
    fn flags_decomposes_code() {
        let code = ExecutionCode::from(ExecutionStatus::InsufficientCash)
            | ExecutionStatus::NotAValidInvestment;
        assert_eq!(
            code.flags(),
            vec![
                ExecutionStatus::InsufficientCash,
                ExecutionStatus::NotAValidInvestment
            ]
        );
    }
}
