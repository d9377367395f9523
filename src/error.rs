use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::execution::DecodeError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Ledger persistence errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("database connection unavailable: {0}")]
    Pool(String),

    #[error("ledger query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("corrupt ledger row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

/// Failures of the marketplace submission call.
///
/// Any of these means the marketplace did not hand back a usable
/// acknowledgment; an acknowledgment whose orders were all declined is not
/// an error.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("marketplace transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("marketplace rejected submission with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed marketplace acknowledgment: {0}")]
    MalformedResponse(String),

    #[error("marketplace credentials missing: {0}")]
    MissingCredentials(&'static str),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures writing to or reading from the ledger.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Ledger(_))
    }

    /// True for failures of the marketplace call itself.
    #[must_use]
    pub const fn is_submission(&self) -> bool {
        matches!(self, Self::Submission(_))
    }

    /// True for caller input that failed validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Ledger(LedgerError::Query(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;

    #[test]
    fn classification_helpers() {
        let ledger: Error = LedgerError::Pool("down".into()).into();
        assert!(ledger.is_persistence());
        assert!(!ledger.is_submission());

        let submission: Error = SubmissionError::MalformedResponse("eof".into()).into();
        assert!(submission.is_submission());

        let domain: Error = DomainError::EmptyBatch.into();
        assert!(domain.is_validation());
    }

    #[test]
    fn messages_are_transparent() {
        let err: Error = DecodeError::UnrecognizedStatus {
            name: "ORDER_LOST".into(),
        }
        .into();
        assert_eq!(err.to_string(), "unrecognized execution status 'ORDER_LOST'");

        let err: Error = SubmissionError::Rejected {
            status: 503,
            body: "busy".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "marketplace rejected submission with status 503: busy"
        );
    }
}
