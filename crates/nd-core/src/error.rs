use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Dimension mismatch: {what} (expected={expected}, actual={actual})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Query outside the covered span. A series with fewer than two samples
    /// covers nothing; `start`/`end` are then its only time (NaN if empty).
    #[error("Time {t} is out of range [{start}, {end}]")]
    OutOfRange { t: f64, start: f64, end: f64 },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

