//! Integrator trait and construction-time selection.

use std::fmt::Debug;

use nd_core::{LinearInterpolator, TimeSeries};
use serde::{Deserialize, Serialize};

use crate::error::{DynError, DynResult};
use crate::euler::{DEFAULT_STEP_SIZE, EulerIntegrator};
use crate::rk45::{Rk45Integrator, Rk45Options};
use crate::system::DynamicalSystem;

/// Trait for time integrators.
pub trait Integrator: Debug {
    /// Run `system` over the full span of `input` and return its output
    /// trajectory. The system's state is left at its terminal value.
    fn integrate(
        &self,
        system: &mut dyn DynamicalSystem,
        input: &TimeSeries,
    ) -> DynResult<TimeSeries>;
}

/// Integrator selection, e.g. from a run file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegratorConfig {
    /// Fixed-step forward Euler.
    Euler {
        #[serde(default = "default_step_size")]
        step_size: f64,
    },
    /// Adaptive Dormand-Prince RK4(5).
    Rk45(Rk45Options),
}

fn default_step_size() -> f64 {
    DEFAULT_STEP_SIZE
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self::Rk45(Rk45Options::default())
    }
}

impl IntegratorConfig {
    pub fn build(&self) -> Box<dyn Integrator> {
        match self {
            Self::Euler { step_size } => Box::new(EulerIntegrator::new(*step_size)),
            Self::Rk45(opts) => Box::new(Rk45Integrator::new(opts.clone())),
        }
    }
}

/// Checks shared by every integrator before the first step.
pub(crate) fn check_input(system: &dyn DynamicalSystem, input: &TimeSeries) -> DynResult<()> {
    LinearInterpolator::new(input).check_coverage()?;
    if input.dimension() != system.input_dimension() {
        return Err(DynError::DimensionMismatch {
            what: "input series vs system input",
            expected: system.input_dimension(),
            actual: input.dimension(),
        });
    }
    Ok(())
}
