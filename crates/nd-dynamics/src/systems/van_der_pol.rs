//! Van der Pol oscillator.

use nd_core::{Real, Units, Vector};

use crate::system::DynamicalSystem;

/// Autonomous oscillator `x' = y`, `y' = -x + epsilon (1 - x^2) y`.
///
/// Takes no input; the output is the full state.
#[derive(Clone, Debug, PartialEq)]
pub struct VanDerPol {
    epsilon: Real,
    state: Vector,
}

impl Default for VanDerPol {
    fn default() -> Self {
        Self::new([0.0, 0.0])
    }
}

impl VanDerPol {
    pub const DEFAULT_EPSILON: Real = 0.3;

    pub fn new(state: [Real; 2]) -> Self {
        Self::with_epsilon(Self::DEFAULT_EPSILON, state)
    }

    pub fn with_epsilon(epsilon: Real, state: [Real; 2]) -> Self {
        Self {
            epsilon,
            state: Vector::from_row_slice(&state),
        }
    }

    pub fn epsilon(&self) -> Real {
        self.epsilon
    }
}

impl DynamicalSystem for VanDerPol {
    fn state(&self) -> &Vector {
        &self.state
    }

    fn set_state(&mut self, state: Vector) {
        self.state = state;
    }

    fn f(&self, _t: Real, _u: &Vector) -> Vector {
        let (x, y) = (self.state[0], self.state[1]);
        Vector::from_vec(vec![y, -x + self.epsilon * (1.0 - x * x) * y])
    }

    fn g(&self, _t: Real, _u: &Vector) -> Vector {
        self.state.clone()
    }

    fn input_dimension(&self) -> usize {
        0
    }

    fn output_dimension(&self) -> usize {
        2
    }

    fn output_units(&self, _index: usize) -> Units {
        Units::Unknown
    }
}
