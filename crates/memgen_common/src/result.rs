//! Common result and error types for the generator.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable internal error (a bug in a caller or in
/// memgen), not a user-facing problem. User problems are reported through
/// the diagnostic sink and the operation still returns `Ok`.
pub type GenResult<T> = Result<T, InternalError>;

/// An internal error indicating a contract violation, not a user input problem.
///
/// Raised, for example, when a planning stage is handed a configuration the
/// feasibility gate would have rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal generator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
