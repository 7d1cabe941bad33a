//! Bundled dynamical systems.

mod lti;
mod van_der_pol;

pub use lti::LtiSystem;
pub use van_der_pol::VanDerPol;
