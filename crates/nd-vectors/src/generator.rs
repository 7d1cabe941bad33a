//! Vector generators.

use nd_core::{Real, Vector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{StandardNormal, Uniform};

use crate::error::{VectorError, VectorResult};

/// Source of vector batches.
pub trait VectorGenerator {
    /// Generate `count` vectors, each of length `dimension`.
    fn gen_vectors(&mut self, count: usize, dimension: usize) -> VectorResult<Vec<Vector>>;
}

impl<G: VectorGenerator + ?Sized> VectorGenerator for Box<G> {
    fn gen_vectors(&mut self, count: usize, dimension: usize) -> VectorResult<Vec<Vector>> {
        (**self).gen_vectors(count, dimension)
    }
}

/// Uniform samples on the surface or within the volume of a hypersphere
/// centred on the origin.
#[derive(Clone, Debug)]
pub struct RandomHypersphereVg {
    surface: bool,
    radius: Real,
    rng: ChaCha8Rng,
}

impl Default for RandomHypersphereVg {
    /// Unit sphere surface, seeded from entropy.
    fn default() -> Self {
        Self {
            surface: true,
            radius: 1.0,
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomHypersphereVg {
    pub fn new(surface: bool, radius: Real) -> VectorResult<Self> {
        Self::with_rng(surface, radius, ChaCha8Rng::from_entropy())
    }

    /// Reproducible generator.
    pub fn with_seed(surface: bool, radius: Real, seed: u64) -> VectorResult<Self> {
        Self::with_rng(surface, radius, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(surface: bool, radius: Real, rng: ChaCha8Rng) -> VectorResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(VectorError::InvalidArg {
                what: "radius must be positive and finite",
            });
        }
        Ok(Self {
            surface,
            radius,
            rng,
        })
    }

    pub fn surface(&self) -> bool {
        self.surface
    }

    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Uniformly distributed unit direction (normalized Gaussian sample).
    fn direction(&mut self, dimension: usize) -> Vector {
        loop {
            let v = Vector::from_fn(dimension, |_, _| self.rng.sample::<Real, _>(StandardNormal));
            let norm = v.norm();
            if norm > Real::EPSILON {
                return v / norm;
            }
        }
    }

    fn sample(&mut self, dimension: usize) -> Vector {
        if dimension == 0 {
            return Vector::zeros(0);
        }
        let direction = self.direction(dimension);
        let r = if self.surface {
            self.radius
        } else {
            let u: Real = self.rng.sample(Uniform::new(0.0, 1.0));
            self.radius * u.powf(1.0 / dimension as Real)
        };
        direction * r
    }
}

impl VectorGenerator for RandomHypersphereVg {
    fn gen_vectors(&mut self, count: usize, dimension: usize) -> VectorResult<Vec<Vector>> {
        Ok((0..count).map(|_| self.sample(dimension)).collect())
    }
}

/// Replays a fixed list of vectors, cycling when more are requested.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedVectorGenerator {
    vectors: Vec<Vector>,
}

impl FixedVectorGenerator {
    pub fn new(vectors: Vec<Vector>) -> VectorResult<Self> {
        let Some(first) = vectors.first() else {
            return Err(VectorError::InvalidArg {
                what: "at least one vector is required",
            });
        };
        let dim = first.len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
            return Err(VectorError::DimensionMismatch {
                what: "fixed vectors",
                expected: dim,
                actual: bad.len(),
            });
        }
        Ok(Self { vectors })
    }

    pub fn from_rows(rows: Vec<Vec<Real>>) -> VectorResult<Self> {
        Self::new(rows.into_iter().map(Vector::from_vec).collect())
    }

    pub fn dimension(&self) -> usize {
        self.vectors[0].len()
    }
}

impl VectorGenerator for FixedVectorGenerator {
    fn gen_vectors(&mut self, count: usize, dimension: usize) -> VectorResult<Vec<Vector>> {
        if dimension != self.dimension() {
            return Err(VectorError::DimensionMismatch {
                what: "requested dimension",
                expected: self.dimension(),
                actual: dimension,
            });
        }
        Ok(self.vectors.iter().cycle().take(count).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_samples_have_radius() {
        let mut vg = RandomHypersphereVg::with_seed(true, 2.5, 7).unwrap();
        let vectors = vg.gen_vectors(50, 4).unwrap();
        assert_eq!(vectors.len(), 50);
        for v in &vectors {
            assert_eq!(v.len(), 4);
            assert!((v.norm() - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn volume_samples_stay_inside() {
        let mut vg = RandomHypersphereVg::with_seed(false, 1.0, 11).unwrap();
        let vectors = vg.gen_vectors(200, 3).unwrap();
        assert!(vectors.iter().all(|v| v.norm() <= 1.0 + 1e-12));
        // Volume sampling puts most mass near the boundary in 3-D, not all on it.
        assert!(vectors.iter().any(|v| v.norm() < 0.9));
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = RandomHypersphereVg::with_seed(true, 1.0, 3).unwrap();
        let mut b = RandomHypersphereVg::with_seed(true, 1.0, 3).unwrap();
        assert_eq!(a.gen_vectors(5, 6).unwrap(), b.gen_vectors(5, 6).unwrap());
    }

    #[test]
    fn zero_dimension_and_count() {
        let mut vg = RandomHypersphereVg::with_seed(true, 1.0, 1).unwrap();
        assert!(vg.gen_vectors(0, 3).unwrap().is_empty());
        let empty = vg.gen_vectors(3, 0).unwrap();
        assert_eq!(empty.len(), 3);
        assert!(empty.iter().all(|v| v.is_empty()));
    }

    #[test]
    fn bad_radius_rejected() {
        assert!(RandomHypersphereVg::new(true, 0.0).is_err());
        assert!(RandomHypersphereVg::with_seed(false, Real::INFINITY, 0).is_err());
    }

    #[test]
    fn fixed_generator_cycles() {
        let mut vg = FixedVectorGenerator::from_rows(vec![vec![1.0, -2.0], vec![3.0, 4.0]]).unwrap();
        let out = vg.gen_vectors(3, 2).unwrap();
        assert_eq!(out[0].as_slice(), &[1.0, -2.0]);
        assert_eq!(out[2].as_slice(), &[1.0, -2.0]);
        assert!(matches!(
            vg.gen_vectors(1, 3),
            Err(VectorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn fixed_generator_requires_consistent_rows() {
        assert!(FixedVectorGenerator::new(vec![]).is_err());
        assert!(FixedVectorGenerator::from_rows(vec![vec![1.0], vec![1.0, 2.0]]).is_err());
    }
}
