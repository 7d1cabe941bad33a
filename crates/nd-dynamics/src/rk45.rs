//! Adaptive Dormand-Prince RK4(5) integration.

use nd_core::{
    CoreResult, Interpolator, LinearInterpolator, Real, TimeSeries, Vector, max_abs,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{DynError, DynResult};
use crate::integrator::{Integrator, check_input};
use crate::system::DynamicalSystem;

// Dormand-Prince tableau. The last row of A equals the 5th-order weights,
// so the final stage state is the 5th-order solution.
const C: [Real; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

const A: [[Real; 6]; 7] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// 5th-order weights minus 4th-order weights.
const E: [Real; 7] = [
    35.0 / 384.0 - 5179.0 / 57600.0,
    0.0,
    500.0 / 1113.0 - 7571.0 / 16695.0,
    125.0 / 192.0 - 393.0 / 640.0,
    -2187.0 / 6784.0 + 92097.0 / 339200.0,
    11.0 / 84.0 - 187.0 / 2100.0,
    -1.0 / 40.0,
];

/// Error-control settings for [`Rk45Integrator`].
///
/// Unset step bounds are derived from the input span: the first step is
/// `span / 100`, the smallest allowed step `span * 1e-9` and the largest
/// `span / 2.5`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rk45Options {
    /// Absolute error tolerance per step.
    pub abs_tol: Real,
    /// Relative error tolerance, scaled by the state's infinity norm.
    pub rel_tol: Real,
    pub initial_step: Option<Real>,
    pub min_step: Option<Real>,
    pub max_step: Option<Real>,
    /// Safety factor applied to the optimal step estimate.
    pub safety: Real,
    /// Smallest factor a step may shrink by after a rejection.
    pub min_factor: Real,
    /// Largest factor a step may grow by after an acceptance.
    pub max_factor: Real,
}

impl Default for Rk45Options {
    fn default() -> Self {
        Self {
            abs_tol: 1e-6,
            rel_tol: 1e-6,
            initial_step: None,
            min_step: None,
            max_step: None,
            safety: 0.8,
            min_factor: 0.2,
            max_factor: 5.0,
        }
    }
}

/// Step bounds resolved against a concrete span.
#[derive(Clone, Copy, Debug, PartialEq)]
struct StepBounds {
    initial: Real,
    min: Real,
    max: Real,
}

impl Rk45Options {
    fn validate(&self) -> DynResult<()> {
        let positive = |v: Real| v.is_finite() && v > 0.0;

        if !positive(self.abs_tol) || !positive(self.rel_tol) {
            return Err(DynError::InvalidArg {
                what: "tolerances must be positive and finite",
            });
        }
        if [self.initial_step, self.min_step, self.max_step]
            .into_iter()
            .flatten()
            .any(|h| !positive(h))
        {
            return Err(DynError::InvalidArg {
                what: "step bounds must be positive and finite",
            });
        }
        if !(self.safety > 0.0 && self.safety <= 1.0) {
            return Err(DynError::InvalidArg {
                what: "safety factor must be in (0, 1]",
            });
        }
        if !(self.min_factor > 0.0 && self.min_factor < 1.0) || !(self.max_factor > 1.0) {
            return Err(DynError::InvalidArg {
                what: "step factors must satisfy 0 < min_factor < 1 < max_factor",
            });
        }
        Ok(())
    }

    fn bounds(&self, span: Real) -> DynResult<StepBounds> {
        let min = self.min_step.unwrap_or(span * 1e-9);
        let max = self.max_step.unwrap_or(span / 2.5);
        if min > max {
            return Err(DynError::InvalidArg {
                what: "min_step must not exceed max_step",
            });
        }
        let initial = self.initial_step.unwrap_or(span / 100.0).clamp(min, max);
        Ok(StepBounds { initial, min, max })
    }

    /// Factor for the next step given the error estimate and its tolerance.
    fn step_factor(&self, err: Real, tau: Real) -> Real {
        if err == 0.0 {
            self.max_factor
        } else if err.is_nan() {
            1.0
        } else {
            (self.safety * (tau / err).powf(0.2)).clamp(self.min_factor, self.max_factor)
        }
    }
}

/// Adaptive integrator using the embedded Dormand-Prince 5(4) pair.
///
/// Each attempted step compares the 5th- and 4th-order solutions. A step is
/// accepted when the infinity norm of their difference is within
/// `max(abs_tol, rel_tol * |x|)`; otherwise it is retried with a smaller step.
/// Accepted steps advance with the 5th-order solution. Shrinking below the
/// minimum step fails with [`DynError::StepSizeUnderflow`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rk45Integrator {
    options: Rk45Options,
}

/// Outcome of one attempted step.
struct Attempt {
    state: Vector,
    error: Real,
    /// Input at the end of the step.
    u_end: Vector,
}

impl Rk45Integrator {
    pub fn new(options: Rk45Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Rk45Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Rk45Options {
        &mut self.options
    }

    /// Evaluate all stages from `t` over `h` without committing the result.
    ///
    /// The system's state is restored before returning.
    fn attempt(
        &self,
        system: &mut dyn DynamicalSystem,
        interpolator: &LinearInterpolator<'_>,
        t: Real,
        h: Real,
        t_end: Real,
    ) -> CoreResult<Attempt> {
        let mut inputs = C
            .iter()
            .map(|c| interpolator.interpolate((t + c * h).min(t_end)))
            .collect::<CoreResult<Vec<_>>>()?;

        let x0 = system.state().clone();
        let mut k: Vec<Vector> = Vec::with_capacity(C.len());
        let mut stage_state = x0.clone();

        for (s, c) in C.iter().enumerate() {
            stage_state = A[s]
                .iter()
                .zip(&k)
                .fold(x0.clone(), |acc, (a, ks)| acc + ks * (a * h));
            system.set_state(stage_state.clone());
            k.push(system.f((t + c * h).min(t_end), &inputs[s]));
        }
        system.set_state(x0);

        let delta = E
            .iter()
            .zip(&k)
            .fold(Vector::zeros(stage_state.len()), |acc, (e, ks)| acc + ks * (e * h));

        Ok(Attempt {
            state: stage_state,
            error: max_abs(&delta),
            u_end: inputs.swap_remove(C.len() - 1),
        })
    }
}

impl Integrator for Rk45Integrator {
    fn integrate(
        &self,
        system: &mut dyn DynamicalSystem,
        input: &TimeSeries,
    ) -> DynResult<TimeSeries> {
        let opts = &self.options;
        opts.validate()?;
        check_input(system, input)?;

        let in_times = input.times();
        let t_start = in_times[0];
        let t_end = in_times[in_times.len() - 1];
        let bounds = opts.bounds(t_end - t_start)?;
        debug!(t_start, t_end, ?bounds, "rk45 integration");

        let interpolator = LinearInterpolator::new(input);

        let mut times = vec![t_start];
        let mut values = vec![system.g(t_start, &input.values()[0])];

        let mut t = t_start;
        let mut h = bounds.initial;
        let mut rejected = 0usize;

        while t < t_end {
            let last = t + h >= t_end;
            let step = if last { t_end - t } else { h };
            if !last && t + step <= t {
                warn!(t, h = step, min_step = bounds.min, "rk45 step does not advance time");
                return Err(DynError::StepSizeUnderflow {
                    t,
                    h: step,
                    min_step: bounds.min,
                });
            }

            let attempt = self.attempt(system, &interpolator, t, step, t_end)?;
            let tau = opts.abs_tol.max(opts.rel_tol * max_abs(system.state()));
            let factor = opts.step_factor(attempt.error, tau);

            // A NaN estimate cannot be controlled; it is passed through.
            if attempt.error <= tau || attempt.error.is_nan() {
                t = if last { t_end } else { t + step };
                system.set_state(attempt.state);
                times.push(t);
                values.push(system.g(t, &attempt.u_end));
                h = (step * factor).min(bounds.max);
            } else {
                let next = step * factor;
                if next < bounds.min {
                    warn!(t, h = next, min_step = bounds.min, "rk45 step size underflow");
                    return Err(DynError::StepSizeUnderflow {
                        t,
                        h: next,
                        min_step: bounds.min,
                    });
                }
                trace!(t, h = step, err = attempt.error, tau, "rk45 step rejected");
                rejected += 1;
                h = next;
            }
        }

        debug!(accepted = times.len() - 1, rejected, "rk45 integration finished");

        let units = system.output_unit_tags();
        Ok(TimeSeries::new(times, values, units)?)
    }
}
