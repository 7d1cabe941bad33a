//! nd-core: data model shared by the neurodyn simulation crates.
//!
//! Contains:
//! - numeric (Real, Vector, tolerances + vector helpers)
//! - units (unit tags for series dimensions + uom time)
//! - time_series (sampled multi-dimensional signals)
//! - interpolate (continuous-time queries over a time series)
//! - error (shared error types)

pub mod error;
pub mod interpolate;
pub mod numeric;
pub mod time_series;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use interpolate::{Interpolator, LinearInterpolator};
pub use numeric::*;
pub use time_series::TimeSeries;
pub use units::Units;
