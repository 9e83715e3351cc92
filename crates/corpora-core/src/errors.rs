//! Error types for corpora-core.
//!
//! Per-row problems never surface here: they become buffered
//! [`crate::diagnostics::Diagnostic`] values and the batch continues. The
//! variants below are reserved for conditions that make the whole input
//! unusable (structural precondition violations) or for internal faults.

use thiserror::Error;

pub type CorporaResult<T> = Result<T, CorporaError>;

#[derive(Debug, Error)]
pub enum CorporaError {
    /// The input is not usable at all (e.g. not a sequence of row maps).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An internal invariant was violated.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl CorporaError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}
