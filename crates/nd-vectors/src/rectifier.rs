//! Sign-folding decorator for vector generators.

use nd_core::Vector;

use crate::error::VectorResult;
use crate::generator::{RandomHypersphereVg, VectorGenerator};

/// Wraps another generator and maps every component to `|x|` (positive mode)
/// or `-|x|` (negative mode). Errors from the wrapped generator pass through
/// unchanged.
#[derive(Clone, Debug)]
pub struct Rectifier<G> {
    inner: G,
    positive: bool,
}

impl Default for Rectifier<RandomHypersphereVg> {
    fn default() -> Self {
        Self::new(RandomHypersphereVg::default())
    }
}

impl<G: VectorGenerator> Rectifier<G> {
    /// Positive rectification.
    pub fn new(inner: G) -> Self {
        Self::with_sign(inner, true)
    }

    pub fn with_sign(inner: G, positive: bool) -> Self {
        Self { inner, positive }
    }

    pub fn positive(&self) -> bool {
        self.positive
    }

    pub fn set_positive(&mut self, positive: bool) {
        self.positive = positive;
    }

    /// The wrapped generator.
    pub fn rectified(&self) -> &G {
        &self.inner
    }

    pub fn rectified_mut(&mut self) -> &mut G {
        &mut self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    fn fold(&self, v: Vector) -> Vector {
        let sign = if self.positive { 1.0 } else { -1.0 };
        v.map(|x| sign * x.abs())
    }
}

impl<G: VectorGenerator> VectorGenerator for Rectifier<G> {
    fn gen_vectors(&mut self, count: usize, dimension: usize) -> VectorResult<Vec<Vector>> {
        let raw = self.inner.gen_vectors(count, dimension)?;
        Ok(raw.into_iter().map(|v| self.fold(v)).collect())
    }
}
