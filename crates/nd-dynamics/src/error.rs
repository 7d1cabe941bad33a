//! Error types for integration.

use nd_core::CoreError;
use thiserror::Error;

/// Errors that abort an integration run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Step size underflow at t={t}: h={h} is below the minimum {min_step}")]
    StepSizeUnderflow { t: f64, h: f64, min_step: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Dimension mismatch: {what} (expected={expected}, actual={actual})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type DynResult<T> = Result<T, DynError>;
