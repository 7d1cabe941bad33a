//! Continuous-time queries over sampled time series.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, Vector};
use crate::time_series::TimeSeries;

/// Produces a value of a sampled signal at an arbitrary time.
pub trait Interpolator {
    fn interpolate(&self, t: Real) -> CoreResult<Vector>;
}

/// Piecewise-linear interpolation between the samples of a [`TimeSeries`].
///
/// Never extrapolates: queries outside the covered span fail with
/// [`CoreError::OutOfRange`], and a series with fewer than two samples cannot
/// be queried at all.
#[derive(Clone, Copy, Debug)]
pub struct LinearInterpolator<'a> {
    series: &'a TimeSeries,
}

impl<'a> LinearInterpolator<'a> {
    pub fn new(series: &'a TimeSeries) -> Self {
        Self { series }
    }

    pub fn series(&self) -> &'a TimeSeries {
        self.series
    }

    /// Fails unless the series has at least two samples to interpolate
    /// between.
    pub fn check_coverage(&self) -> CoreResult<()> {
        let times = self.series.times();
        if times.len() < 2 {
            let only = times.first().copied().unwrap_or(Real::NAN);
            return Err(CoreError::OutOfRange {
                t: only,
                start: only,
                end: only,
            });
        }
        Ok(())
    }

    /// Index `i` such that `times[i] <= t <= times[i + 1]`.
    fn bracket(&self, t: Real) -> CoreResult<usize> {
        let times = self.series.times();
        if times.len() < 2 {
            let only = times.first().copied().unwrap_or(Real::NAN);
            return Err(CoreError::OutOfRange {
                t,
                start: only,
                end: only,
            });
        }

        let start = times[0];
        let end = times[times.len() - 1];
        if !(start..=end).contains(&t) {
            return Err(CoreError::OutOfRange { t, start, end });
        }

        // First index with times[idx] > t; t == end lands on the last segment.
        let idx = times.partition_point(|&x| x <= t);
        Ok(idx.saturating_sub(1).min(times.len() - 2))
    }
}

impl Interpolator for LinearInterpolator<'_> {
    fn interpolate(&self, t: Real) -> CoreResult<Vector> {
        let i = self.bracket(t)?;
        let times = self.series.times();
        let values = self.series.values();

        let (t0, t1) = (times[i], times[i + 1]);
        if t == t0 {
            return Ok(values[i].clone());
        }
        if t == t1 {
            return Ok(values[i + 1].clone());
        }

        let width = t1 - t0;
        if width == 0.0 {
            return Ok(values[i].clone());
        }

        let frac = (t - t0) / width;
        Ok(&values[i] + (&values[i + 1] - &values[i]) * frac)
    }
}
