//! Time integration of continuous-time dynamical systems.
//!
//! Provides:
//! - `DynamicalSystem` trait (state, derivative `f`, output `g`, unit metadata)
//! - Fixed-step forward Euler integrator
//! - Adaptive Dormand-Prince RK4(5) integrator
//! - Bundled systems: linear time-invariant, Van der Pol oscillator
//!
//! Integrators consume a driving input `TimeSeries`, interpolate it linearly
//! between samples, and return the system's output trajectory over exactly
//! the input's time span.

pub mod error;
pub mod euler;
pub mod integrator;
pub mod rk45;
pub mod system;
pub mod systems;

// Re-exports for public API
pub use error::{DynError, DynResult};
pub use euler::EulerIntegrator;
pub use integrator::{Integrator, IntegratorConfig};
pub use rk45::{Rk45Integrator, Rk45Options};
pub use system::DynamicalSystem;
pub use systems::{LtiSystem, VanDerPol};
