//! Vector sampling for seeding high-dimensional model parameters.
//!
//! A [`VectorGenerator`] produces batches of vectors of a requested
//! dimension. [`Rectifier`] wraps any generator and folds every component to
//! one sign.

pub mod error;
pub mod generator;
pub mod rectifier;

pub use error::{VectorError, VectorResult};
pub use generator::{FixedVectorGenerator, RandomHypersphereVg, VectorGenerator};
pub use rectifier::Rectifier;
