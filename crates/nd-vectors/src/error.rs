//! Error types for vector generation.

use thiserror::Error;

/// Result type for vector generation.
pub type VectorResult<T> = Result<T, VectorError>;

/// Errors raised by vector generators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VectorError {
    /// Invalid argument provided to a generator.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Requested dimension cannot be produced by this generator.
    #[error("Dimension mismatch: {what} (expected={expected}, actual={actual})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
