//! Error types for the dice engine.

/// Errors that can occur while configuring or driving a loaded roll.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// An anchor name other than `low` or `high`.
    #[error("invalid anchor: {0} (expected 'low' or 'high')")]
    InvalidAnchor(String),

    /// The animation timing cannot produce a roll.
    #[error("invalid timing: {0}")]
    InvalidTiming(String),

    /// A weight table breaks the sampling precondition.
    #[error("invalid weights: {0}")]
    InvalidWeights(String),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
