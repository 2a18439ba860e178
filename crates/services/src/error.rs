//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::score::ScoreError;

/// Errors emitted by quiz session operations.
///
/// Variants fall into two kinds: invalid input (empty user name,
/// out-of-range indices) and phase violations (`is_state_error`). Every
/// failing operation leaves the session unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("user name cannot be empty")]
    EmptyUserName,

    #[error("cannot start a session with no questions")]
    EmptyQuestionSet,

    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("position {position} is out of range for {len} questions")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("session has already started")]
    AlreadyStarted,

    #[error("session has not started")]
    NotStarted,

    #[error("session is already completed")]
    AlreadyCompleted,

    #[error("session has not been completed")]
    NotCompleted,

    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl SessionError {
    /// Whether this error reports a phase violation rather than bad input.
    #[must_use]
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            SessionError::AlreadyStarted
                | SessionError::NotStarted
                | SessionError::AlreadyCompleted
                | SessionError::NotCompleted
        )
    }
}
