//! Domain-specific error types.
//!
//! Only caller mistakes surface as errors. A wrong, expired or unknown code
//! is a plain `false` from validation, never an error, so callers cannot
//! tell those cases apart.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("A one-time passcode is already pending for this identity")]
    ChallengePending,
}

impl DomainError {
    /// Shorthand for an `InvalidArgument` error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DomainError::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
