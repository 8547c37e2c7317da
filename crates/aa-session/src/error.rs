//! Error types for the demo session.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving the demo flow.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No question with this id exists.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// The action is not available on the current screen.
    #[error("not allowed now: {0}")]
    InvalidAction(String),

    /// Unknown interactive command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Dice engine error.
    #[error("{0}")]
    Dice(#[from] aa_dice::DiceError),
}
