//! YAML run files.
//!
//! ```yaml
//! system:
//!   type: van_der_pol
//!   initial_state: [0.1, 0.1]
//! integrator:
//!   type: rk45
//! input:
//!   times: [0.0, 10.0]
//!   values: [[], []]
//!   units: []
//! ```

use std::path::Path;

use nalgebra::DMatrix;
use nd_core::{Real, TimeSeries, Units, Vector};
use nd_dynamics::{DynamicalSystem, IntegratorConfig, LtiSystem, VanDerPol};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// A complete simulation request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    pub system: SystemConfig,
    #[serde(default)]
    pub integrator: IntegratorConfig,
    pub input: TimeSeries,
}

/// Which system to simulate, with its parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SystemConfig {
    VanDerPol {
        #[serde(default = "default_epsilon")]
        epsilon: Real,
        initial_state: [Real; 2],
    },
    Lti {
        a: Vec<Vec<Real>>,
        b: Vec<Vec<Real>>,
        c: Vec<Vec<Real>>,
        d: Vec<Vec<Real>>,
        initial_state: Vec<Real>,
        #[serde(default)]
        output_units: Option<Vec<Units>>,
    },
}

fn default_epsilon() -> Real {
    VanDerPol::DEFAULT_EPSILON
}

impl RunConfig {
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> CliResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

impl SystemConfig {
    pub fn build(&self) -> CliResult<Box<dyn DynamicalSystem>> {
        match self {
            Self::VanDerPol {
                epsilon,
                initial_state,
            } => Ok(Box::new(VanDerPol::with_epsilon(*epsilon, *initial_state))),
            Self::Lti {
                a,
                b,
                c,
                d,
                initial_state,
                output_units,
            } => {
                let n = initial_state.len();
                let a = matrix("a", a, n)?;
                let b = matrix("b", b, 0)?;
                let c = matrix("c", c, n)?;
                let d = matrix("d", d, b.ncols())?;
                let units = output_units
                    .clone()
                    .unwrap_or_else(|| Units::uniform(Units::Unitless, c.nrows()));
                let system = LtiSystem::new(
                    a,
                    b,
                    c,
                    d,
                    Vector::from_vec(initial_state.clone()),
                    units,
                )?;
                Ok(Box::new(system))
            }
        }
    }
}

/// Row-major matrix; `cols_if_empty` sizes a matrix given with no rows.
fn matrix(name: &str, rows: &[Vec<Real>], cols_if_empty: usize) -> CliResult<DMatrix<Real>> {
    let ncols = rows.first().map_or(cols_if_empty, Vec::len);
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(CliError::InvalidConfig {
            what: format!("matrix '{name}' has rows of different lengths"),
        });
    }
    let flat: Vec<Real> = rows.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &flat))
}
