use thiserror::Error;

/// Validation failures reported back to the user when setting a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountdownError {
    #[error("Please pick a valid date & time.")]
    EmptyTarget,
    #[error("Invalid date/time: {0}")]
    InvalidTarget(String),
}
