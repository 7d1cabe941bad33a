//! Fixed-step forward Euler integration.

use nd_core::units::{Time, to_seconds};
use nd_core::{Interpolator, LinearInterpolator, Real, TimeSeries, add_scaled};
use tracing::{debug, warn};

use crate::error::{DynError, DynResult};
use crate::integrator::{Integrator, check_input};
use crate::system::DynamicalSystem;

/// Default step size (seconds).
pub const DEFAULT_STEP_SIZE: Real = 1e-4;

/// Scales the span before dividing by the step so that rounding in
/// `span / h` cannot add a vanishingly small extra step at the end.
pub const SHRINK: Real = 0.99999;

/// Default cap on the number of steps in one run.
pub const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// Forward Euler: `x(t + h) = x(t) + h * f(t + h, u(t + h))`.
///
/// The input is linearly interpolated at the end of each step. The last step
/// is shortened (or stretched by the rounding margin) so the output ends
/// exactly on the input's final time.
#[derive(Clone, Debug, PartialEq)]
pub struct EulerIntegrator {
    step_size: Real,
    max_steps: usize,
}

impl Default for EulerIntegrator {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_SIZE)
    }
}

impl EulerIntegrator {
    pub fn new(step_size: Real) -> Self {
        Self {
            step_size,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn from_time(step: Time) -> Self {
        Self::new(to_seconds(step))
    }

    pub fn step_size(&self) -> Real {
        self.step_size
    }

    pub fn set_step_size(&mut self, step_size: Real) {
        self.step_size = step_size;
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps;
    }

    /// Number of whole steps needed to cover `span`.
    ///
    /// Fails when the count is not finite or exceeds `max_steps`.
    pub fn step_count(&self, span: Real) -> DynResult<usize> {
        let steps = (span * SHRINK / self.step_size).ceil();
        if !steps.is_finite() || steps > self.max_steps as Real {
            return Err(DynError::InvalidArg {
                what: "step count exceeds max_steps",
            });
        }
        Ok(steps as usize)
    }
}

impl Integrator for EulerIntegrator {
    fn integrate(
        &self,
        system: &mut dyn DynamicalSystem,
        input: &TimeSeries,
    ) -> DynResult<TimeSeries> {
        let h = self.step_size;
        if !h.is_finite() || h <= 0.0 {
            return Err(DynError::InvalidArg {
                what: "step size must be positive and finite",
            });
        }
        if self.max_steps == 0 {
            return Err(DynError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        check_input(system, input)?;

        let in_times = input.times();
        let t_start = in_times[0];
        let t_end = in_times[in_times.len() - 1];
        let steps = self.step_count(t_end - t_start)?;
        debug!(steps, h, t_start, t_end, "euler integration");

        let interpolator = LinearInterpolator::new(input);

        let mut times = Vec::with_capacity(steps + 1);
        let mut values = Vec::with_capacity(steps + 1);
        times.push(t_start);
        values.push(system.g(t_start, &input.values()[0]));

        let mut t = t_start;
        for i in 1..=steps {
            // Times are taken from the start, not accumulated, so they never
            // drift past `t_end`.
            let next = if i < steps {
                (t_start + i as Real * h).min(t_end)
            } else {
                t_end
            };
            if next <= t {
                warn!(t, h, "euler step does not advance time");
                return Err(DynError::StepSizeUnderflow {
                    t,
                    h,
                    min_step: t.abs() * Real::EPSILON,
                });
            }
            let dt = next - t;
            t = next;

            let u = interpolator.interpolate(t)?;
            let dxdt = system.f(t, &u);
            let state = add_scaled(system.state(), &dxdt, dt);
            system.set_state(state);

            times.push(t);
            values.push(system.g(t, &u));
        }

        let units = system.output_unit_tags();
        Ok(TimeSeries::new(times, values, units)?)
    }
}

#[cfg(test)]
mod tests {
    use nd_core::units::s;
    use nd_core::{CoreError, Units};

    use super::*;
    use crate::systems::LtiSystem;

    fn span(start: Real, end: Real) -> TimeSeries {
        TimeSeries::from_rows(vec![start, end], vec![vec![], vec![]], vec![]).unwrap()
    }

    #[test]
    fn default_step_size() {
        assert_eq!(EulerIntegrator::default().step_size(), 1e-4);
        assert_eq!(EulerIntegrator::from_time(s(0.5)).step_size(), 0.5);

        let mut integrator = EulerIntegrator::default();
        integrator.set_step_size(0.01);
        assert_eq!(integrator.step_size(), 0.01);
    }

    #[test]
    fn step_count_absorbs_rounding() {
        let integrator = EulerIntegrator::new(0.1);
        assert_eq!(integrator.step_count(1.0).unwrap(), 10);
        // Slightly over a whole number of steps does not add a sliver step.
        assert_eq!(integrator.step_count(1.000_001).unwrap(), 10);
        assert_eq!(EulerIntegrator::new(0.3).step_count(1.0).unwrap(), 4);
    }

    #[test]
    fn last_step_lands_on_end_time() {
        let mut system = LtiSystem::integrator_bank(1, Units::Unitless);
        let input = TimeSeries::from_rows(
            vec![0.0, 1.0],
            vec![vec![1.0], vec![1.0]],
            vec![Units::Unitless],
        )
        .unwrap();

        let out = EulerIntegrator::new(0.3).integrate(&mut system, &input).unwrap();
        assert_eq!(out.times().len(), 5);
        assert_eq!(out.times()[0], 0.0);
        assert_eq!(*out.times().last().unwrap(), 1.0);
        // Constant unit input into a pure integrator: exact for Euler.
        assert!((system.state()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn exponential_decay_converges() {
        let input = TimeSeries::from_rows(
            vec![0.0, 1.0],
            vec![vec![0.0], vec![0.0]],
            vec![Units::Unitless],
        )
        .unwrap();
        let mut system = LtiSystem::first_order_decay(1.0, 1.0);
        let out = EulerIntegrator::new(1e-4).integrate(&mut system, &input).unwrap();
        let last = out.values().last().unwrap()[0];
        assert!((last - (-1.0_f64).exp()).abs() < 1e-4);
    }

    #[test]
    fn input_dimension_must_match_system() {
        let mut system = LtiSystem::first_order_decay(1.0, 1.0);
        let err = EulerIntegrator::new(1e-2)
            .integrate(&mut system, &span(0.0, 1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            DynError::DimensionMismatch {
                expected: 1,
                actual: 0,
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_step_size() {
        let mut system = LtiSystem::integrator_bank(0, Units::Unitless);
        for h in [0.0, -1.0, Real::NAN] {
            let err = EulerIntegrator::new(h)
                .integrate(&mut system, &span(0.0, 1.0))
                .unwrap_err();
            assert!(matches!(err, DynError::InvalidArg { .. }));
        }
    }

    #[test]
    fn single_sample_input_is_out_of_range() {
        let mut system = LtiSystem::integrator_bank(0, Units::Unitless);
        let input = TimeSeries::from_rows(vec![0.0], vec![vec![]], vec![]).unwrap();
        let err = EulerIntegrator::default()
            .integrate(&mut system, &input)
            .unwrap_err();
        assert!(matches!(
            err,
            DynError::Core(CoreError::OutOfRange { .. })
        ));
    }

    #[test]
    fn unresolvable_step_at_large_time_is_underflow() {
        // At t = 1e12 the spacing between floats is ~1.2e-4, so a 1e-5 step
        // cannot move time forward.
        let mut system = LtiSystem::integrator_bank(0, Units::Unitless);
        let err = EulerIntegrator::new(1e-5)
            .integrate(&mut system, &span(1e12, 1e12 + 1e-3))
            .unwrap_err();
        assert!(matches!(err, DynError::StepSizeUnderflow { .. }));
    }

    #[test]
    fn large_time_offset_stays_inside_span() {
        let mut system = LtiSystem::integrator_bank(0, Units::Unitless);
        let (t_start, t_end) = (1e6, 1e6 + 1.0);
        let out = EulerIntegrator::new(1e-3)
            .integrate(&mut system, &span(t_start, t_end))
            .unwrap();

        let times = out.times();
        assert_eq!(times.len(), 1001);
        assert_eq!(times[0], t_start);
        assert_eq!(*times.last().unwrap(), t_end);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn step_count_is_capped() {
        let mut system = LtiSystem::integrator_bank(0, Units::Unitless);
        let err = EulerIntegrator::new(1e-9)
            .integrate(&mut system, &span(0.0, 1e6))
            .unwrap_err();
        assert!(matches!(err, DynError::InvalidArg { .. }));

        let mut integrator = EulerIntegrator::new(0.1);
        assert_eq!(integrator.max_steps(), DEFAULT_MAX_STEPS);
        integrator.set_max_steps(5);
        assert!(integrator.step_count(1.0).is_err());
        integrator.set_max_steps(0);
        let err = integrator
            .integrate(&mut system, &span(0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, DynError::InvalidArg { .. }));
    }
}
