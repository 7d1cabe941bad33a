//! DynamicalSystem trait for pluggable models.

use nd_core::{Real, Units, Vector};

/// A continuous-time system `x' = f(t, u)`, `y = g(t, u)` over an internal
/// state `x`.
///
/// `f` and `g` read the current state and must not depend on anything else
/// besides their arguments. Integrators advance the state with
/// [`set_state`](DynamicalSystem::set_state) between evaluations.
pub trait DynamicalSystem {
    /// Current state vector.
    fn state(&self) -> &Vector;

    /// Replace the state vector.
    fn set_state(&mut self, state: Vector);

    /// State derivative at time `t` given input `u`.
    fn f(&self, t: Real, u: &Vector) -> Vector;

    /// Output at time `t` given input `u`.
    fn g(&self, t: Real, u: &Vector) -> Vector;

    fn input_dimension(&self) -> usize;

    fn output_dimension(&self) -> usize;

    /// Unit tag of output dimension `index`.
    fn output_units(&self, index: usize) -> Units;

    /// Unit tags of every output dimension, in order.
    fn output_unit_tags(&self) -> Vec<Units> {
        (0..self.output_dimension())
            .map(|i| self.output_units(i))
            .collect()
    }
}
