//! Sampled, multi-dimensional signals.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, Vector};
use crate::units::Units;

/// Values sampled at strictly increasing times, with unit and label metadata
/// for each of its `D` dimensions.
///
/// The dimension is taken from the unit tags, so an empty series still knows
/// its dimension. Sample data cannot be changed after construction; only the
/// name, unit tags and labels can be edited. `clone` is a deep copy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "raw::RawTimeSeries", try_from = "raw::RawTimeSeries")
)]
pub struct TimeSeries {
    times: Vec<Real>,
    values: Vec<Vector>,
    units: Vec<Units>,
    labels: Vec<String>,
    name: Option<String>,
}

impl TimeSeries {
    /// Create a series with default labels `"1"..="D"`.
    pub fn new(times: Vec<Real>, values: Vec<Vector>, units: Vec<Units>) -> CoreResult<Self> {
        let labels = default_labels(units.len());
        Self::with_labels(times, values, units, labels)
    }

    pub fn with_labels(
        times: Vec<Real>,
        values: Vec<Vector>,
        units: Vec<Units>,
        labels: Vec<String>,
    ) -> CoreResult<Self> {
        check_dimensions(&times, &values, &units, &labels)?;
        check_times(&times)?;

        Ok(Self {
            times,
            values,
            units,
            labels,
            name: None,
        })
    }

    /// Convenience constructor from plain rows.
    pub fn from_rows(times: Vec<Real>, rows: Vec<Vec<Real>>, units: Vec<Units>) -> CoreResult<Self> {
        let values = rows.into_iter().map(Vector::from_vec).collect();
        Self::new(times, values, units)
    }

    /// Builder-style name assignment.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn times(&self) -> &[Real] {
        &self.times
    }

    pub fn values(&self) -> &[Vector] {
        &self.values
    }

    pub fn units(&self) -> &[Units] {
        &self.units
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Number of dimensions (equal to the number of unit tags).
    pub fn dimension(&self) -> usize {
        self.units.len()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn start_time(&self) -> Option<Real> {
        self.times.first().copied()
    }

    pub fn end_time(&self) -> Option<Real> {
        self.times.last().copied()
    }

    /// `end - start`, or zero for an empty series.
    pub fn span(&self) -> Real {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => end - start,
            _ => 0.0,
        }
    }

    pub fn set_units(&mut self, index: usize, units: Units) -> CoreResult<()> {
        let len = self.units.len();
        let slot = self.units.get_mut(index).ok_or(CoreError::IndexOob {
            what: "units",
            index,
            len,
        })?;
        *slot = units;
        Ok(())
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> CoreResult<()> {
        let len = self.labels.len();
        let slot = self.labels.get_mut(index).ok_or(CoreError::IndexOob {
            what: "labels",
            index,
            len,
        })?;
        *slot = label.into();
        Ok(())
    }
}

fn default_labels(n: usize) -> Vec<String> {
    (1..=n).map(|i| i.to_string()).collect()
}

fn check_dimensions(
    times: &[Real],
    values: &[Vector],
    units: &[Units],
    labels: &[String],
) -> CoreResult<()> {
    if times.len() != values.len() {
        return Err(CoreError::DimensionMismatch {
            what: "values per time",
            expected: times.len(),
            actual: values.len(),
        });
    }

    if let Some(bad) = values.iter().find(|v| v.len() != units.len()) {
        return Err(CoreError::DimensionMismatch {
            what: "value dimension vs units",
            expected: units.len(),
            actual: bad.len(),
        });
    }

    if labels.len() != units.len() {
        return Err(CoreError::DimensionMismatch {
            what: "labels vs units",
            expected: units.len(),
            actual: labels.len(),
        });
    }

    Ok(())
}

fn check_times(times: &[Real]) -> CoreResult<()> {
    if times.iter().any(|t| !t.is_finite()) {
        return Err(CoreError::InvalidArg {
            what: "times must be finite",
        });
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(CoreError::InvalidArg {
            what: "times must be strictly increasing",
        });
    }
    Ok(())
}

#[cfg(feature = "serde")]
mod raw {
    use serde::{Deserialize, Serialize};

    use super::TimeSeries;
    use crate::error::CoreError;
    use crate::numeric::{Real, Vector};
    use crate::units::Units;

    #[derive(Serialize, Deserialize)]
    pub(super) struct RawTimeSeries {
        times: Vec<Real>,
        values: Vec<Vec<Real>>,
        units: Vec<Units>,
        #[serde(default)]
        labels: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    }

    impl From<TimeSeries> for RawTimeSeries {
        fn from(ts: TimeSeries) -> Self {
            Self {
                times: ts.times,
                values: ts.values.iter().map(|v| v.as_slice().to_vec()).collect(),
                units: ts.units,
                labels: Some(ts.labels),
                name: ts.name,
            }
        }
    }

    impl TryFrom<RawTimeSeries> for TimeSeries {
        type Error = CoreError;

        fn try_from(raw: RawTimeSeries) -> Result<Self, Self::Error> {
            let values = raw.values.into_iter().map(Vector::from_vec).collect();
            let mut ts = match raw.labels {
                Some(labels) => TimeSeries::with_labels(raw.times, values, raw.units, labels)?,
                None => TimeSeries::new(raw.times, values, raw.units)?,
            };
            ts.name = raw.name;
            Ok(ts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_dim() -> TimeSeries {
        TimeSeries::from_rows(
            vec![0.0, 1.0, 2.0],
            vec![vec![0.0, 1.0], vec![1.0, 2.0], vec![2.0, 3.0]],
            vec![Units::Millivolts, Units::Amps],
        )
        .unwrap()
    }

    #[test]
    fn default_labels_count_from_one() {
        let ts = two_dim();
        assert_eq!(ts.labels(), &["1".to_string(), "2".to_string()]);
        assert_eq!(ts.dimension(), 2);
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.span(), 2.0);
    }

    #[test]
    fn times_values_length_mismatch() {
        let err = TimeSeries::from_rows(vec![0.0, 1.0], vec![vec![1.0]], vec![Units::Volts])
            .unwrap_err();
        assert!(matches!(err, CoreError::DimensionMismatch { .. }));
    }

    #[test]
    fn value_units_mismatch() {
        let err = TimeSeries::from_rows(
            vec![0.0],
            vec![vec![1.0, 2.0]],
            vec![Units::Volts],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::DimensionMismatch {
                expected: 1,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn empty_series_keeps_units() {
        let ts = TimeSeries::new(vec![], vec![], vec![Units::Seconds; 3]).unwrap();
        assert!(ts.is_empty());
        assert_eq!(ts.dimension(), 3);
        assert_eq!(ts.start_time(), None);
        assert_eq!(ts.span(), 0.0);
    }

    #[test]
    fn zero_dimensional_series() {
        let ts = TimeSeries::from_rows(vec![0.0, 10.0], vec![vec![], vec![]], vec![]).unwrap();
        assert_eq!(ts.dimension(), 0);
        assert_eq!(ts.len(), 2);
    }

    #[test]
    fn non_increasing_times_rejected() {
        let err = TimeSeries::from_rows(vec![0.0, 0.0], vec![vec![], vec![]], vec![]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArg { .. }));
    }

    #[test]
    fn clone_is_independent() {
        let original = two_dim().named("membrane");
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_label(0, "voltage").unwrap();
        copy.set_units(1, Units::Unitless).unwrap();
        copy.set_name("copy");

        assert_eq!(original.labels()[0], "1");
        assert_eq!(original.units()[1], Units::Amps);
        assert_eq!(original.name(), Some("membrane"));
        assert_ne!(copy, original);
    }

    #[test]
    fn metadata_setters_check_index() {
        let mut ts = two_dim();
        let err = ts.set_label(2, "x").unwrap_err();
        assert!(matches!(err, CoreError::IndexOob { index: 2, len: 2, .. }));
        assert!(ts.set_units(5, Units::Volts).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_rejects_bad_dimensions() {
        let json = r#"{"times":[0.0,1.0],"values":[[1.0]],"units":["volts"]}"#;
        assert!(serde_json::from_str::<TimeSeries>(json).is_err());

        let json = r#"{"times":[0.0,1.0],"values":[[1.0],[2.0]],"units":["volts"]}"#;
        let ts: TimeSeries = serde_json::from_str(json).unwrap();
        assert_eq!(ts.labels(), &["1".to_string()]);
    }
}
