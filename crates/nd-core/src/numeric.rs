use nalgebra::DVector;

/// Floating point type used throughout system
pub type Real = f64;

/// Dense state/value vector.
pub type Vector = DVector<Real>;

/// `x + k * h`, the basic update shared by the explicit integrators.
pub fn add_scaled(x: &Vector, k: &Vector, h: Real) -> Vector {
    x + k * h
}

/// Infinity norm; zero for an empty vector.
pub fn max_abs(v: &Vector) -> Real {
    v.iter().fold(0.0, |acc, x| acc.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_scaled_is_euler_update() {
        let x = Vector::from_vec(vec![1.0, 2.0]);
        let k = Vector::from_vec(vec![10.0, -10.0]);
        let y = add_scaled(&x, &k, 0.5);
        assert_eq!(y.as_slice(), &[6.0, -3.0]);
    }

    #[test]
    fn max_abs_of_empty_is_zero() {
        assert_eq!(max_abs(&Vector::zeros(0)), 0.0);
        assert_eq!(max_abs(&Vector::from_vec(vec![-3.0, 2.0])), 3.0);
    }
}
