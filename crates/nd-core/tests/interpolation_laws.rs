//! Property tests for piecewise-linear interpolation.

use nd_core::{CoreError, Interpolator, LinearInterpolator, TimeSeries, Units};
use proptest::prelude::*;

/// Strictly increasing times built from positive gaps, with matching rows.
fn series_strategy() -> impl Strategy<Value = TimeSeries> {
    (1usize..4, 2usize..12).prop_flat_map(|(dim, n)| {
        (
            -100.0_f64..100.0,
            prop::collection::vec(1e-3_f64..10.0, n - 1),
            prop::collection::vec(prop::collection::vec(-1e3_f64..1e3, dim), n),
        )
            .prop_map(move |(start, gaps, rows)| {
                let mut times = Vec::with_capacity(gaps.len() + 1);
                times.push(start);
                for gap in gaps {
                    let last = *times.last().unwrap();
                    times.push(last + gap);
                }
                TimeSeries::from_rows(times, rows, vec![Units::Unitless; dim]).unwrap()
            })
    })
}

proptest! {
    #[test]
    fn sample_times_return_samples_exactly(ts in series_strategy()) {
        let interp = LinearInterpolator::new(&ts);
        for (t, v) in ts.times().iter().zip(ts.values()) {
            prop_assert_eq!(&interp.interpolate(*t).unwrap(), v);
        }
    }

    #[test]
    fn interior_values_stay_between_neighbours(ts in series_strategy(), frac in 0.0_f64..1.0, pick in any::<prop::sample::Index>()) {
        let times = ts.times();
        let i = pick.index(times.len() - 1);
        let t = times[i] + frac * (times[i + 1] - times[i]);
        prop_assume!(t > times[i] && t < times[i + 1]);

        let v = LinearInterpolator::new(&ts).interpolate(t).unwrap();
        let (a, b) = (&ts.values()[i], &ts.values()[i + 1]);
        for d in 0..ts.dimension() {
            let lo = a[d].min(b[d]);
            let hi = a[d].max(b[d]);
            prop_assert!(v[d] >= lo - 1e-9 && v[d] <= hi + 1e-9);
        }
    }

    #[test]
    fn outside_span_is_rejected(ts in series_strategy(), offset in 1e-6_f64..100.0) {
        let interp = LinearInterpolator::new(&ts);
        let start = ts.start_time().unwrap();
        let end = ts.end_time().unwrap();
        let before = matches!(interp.interpolate(start - offset), Err(CoreError::OutOfRange { .. }));
        let after = matches!(interp.interpolate(end + offset), Err(CoreError::OutOfRange { .. }));
        prop_assert!(before);
        prop_assert!(after);
    }
}
