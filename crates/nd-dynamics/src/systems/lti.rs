//! Linear time-invariant system.

use nalgebra::DMatrix;
use nd_core::{Real, Units, Vector};

use crate::error::{DynError, DynResult};
use crate::system::DynamicalSystem;

/// `x' = A x + B u`, `y = C x + D u`.
#[derive(Clone, Debug, PartialEq)]
pub struct LtiSystem {
    a: DMatrix<Real>,
    b: DMatrix<Real>,
    c: DMatrix<Real>,
    d: DMatrix<Real>,
    state: Vector,
    output_units: Vec<Units>,
}

impl LtiSystem {
    /// Create a system, checking that all matrix shapes agree.
    ///
    /// With `n` states, `p` inputs and `q` outputs: `A` is `n x n`, `B` is
    /// `n x p`, `C` is `q x n`, `D` is `q x p`, and there are `q` unit tags.
    pub fn new(
        a: DMatrix<Real>,
        b: DMatrix<Real>,
        c: DMatrix<Real>,
        d: DMatrix<Real>,
        state: Vector,
        output_units: Vec<Units>,
    ) -> DynResult<Self> {
        let n = state.len();
        let p = b.ncols();
        let q = c.nrows();

        let checks = [
            ("A rows", n, a.nrows()),
            ("A columns", n, a.ncols()),
            ("B rows", n, b.nrows()),
            ("C columns", n, c.ncols()),
            ("D rows", q, d.nrows()),
            ("D columns", p, d.ncols()),
            ("output units", q, output_units.len()),
        ];
        if let Some((what, expected, actual)) = checks.into_iter().find(|(_, e, a)| e != a) {
            return Err(DynError::DimensionMismatch {
                what,
                expected,
                actual,
            });
        }

        Ok(Self {
            a,
            b,
            c,
            d,
            state,
            output_units,
        })
    }

    /// `n` independent integrators, `x_i' = u_i`, observed directly.
    pub fn integrator_bank(n: usize, units: Units) -> Self {
        Self {
            a: DMatrix::zeros(n, n),
            b: DMatrix::identity(n, n),
            c: DMatrix::identity(n, n),
            d: DMatrix::zeros(n, n),
            state: Vector::zeros(n),
            output_units: Units::uniform(units, n),
        }
    }

    /// Scalar `x' = -rate * x + u`, `y = x`, starting from `x0`.
    pub fn first_order_decay(rate: Real, x0: Real) -> Self {
        Self {
            a: DMatrix::from_element(1, 1, -rate),
            b: DMatrix::identity(1, 1),
            c: DMatrix::identity(1, 1),
            d: DMatrix::zeros(1, 1),
            state: Vector::from_element(1, x0),
            output_units: vec![Units::Unitless],
        }
    }

    pub fn a(&self) -> &DMatrix<Real> {
        &self.a
    }

    pub fn b(&self) -> &DMatrix<Real> {
        &self.b
    }

    pub fn c(&self) -> &DMatrix<Real> {
        &self.c
    }

    pub fn d(&self) -> &DMatrix<Real> {
        &self.d
    }

    pub fn set_output_units(&mut self, index: usize, units: Units) -> DynResult<()> {
        let slot = self
            .output_units
            .get_mut(index)
            .ok_or(DynError::InvalidArg {
                what: "output unit index out of range",
            })?;
        *slot = units;
        Ok(())
    }
}

impl DynamicalSystem for LtiSystem {
    fn state(&self) -> &Vector {
        &self.state
    }

    fn set_state(&mut self, state: Vector) {
        self.state = state;
    }

    fn f(&self, _t: Real, u: &Vector) -> Vector {
        &self.a * &self.state + &self.b * u
    }

    fn g(&self, _t: Real, u: &Vector) -> Vector {
        &self.c * &self.state + &self.d * u
    }

    fn input_dimension(&self) -> usize {
        self.b.ncols()
    }

    fn output_dimension(&self) -> usize {
        self.c.nrows()
    }

    fn output_units(&self, index: usize) -> Units {
        self.output_units.get(index).copied().unwrap_or_default()
    }
}
