//! Data-parallel helpers over independent matrices.
//!
//! Each item is processed on the rayon thread pool; results come back in
//! input order. Errors from any item abort the whole batch.
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::KernelConfig;
use crate::error::Result;
use crate::factory::{FactoryCache, IdentityMatrix, MatrixFactory};
use crate::math::{Matrix, Real, Scalar, Vector};

/// Checked products of every `(lhs, rhs)` pair.
pub fn par_multiply<T: Scalar>(pairs: &[(Matrix<T>, Matrix<T>)]) -> Result<Vec<Matrix<T>>> {
    log::debug!("multiplying {} matrix pairs", pairs.len());
    pairs
        .par_iter()
        .map(|(lhs, rhs)| lhs.try_mul(rhs))
        .collect::<Result<Vec<_>>>()
}

/// Apply `matrix` to each vector, returning the transformed copies.
pub fn par_apply<T: Scalar>(matrix: &Matrix<T>, vectors: &[Vector<T>]) -> Result<Vec<Vector<T>>> {
    log::debug!(
        "applying {}x{} matrix to {} vectors",
        matrix.height(),
        matrix.width(),
        vectors.len()
    );
    vectors
        .par_iter()
        .map(|vec| {
            let mut out = vec.clone();
            matrix.try_apply(&mut out)?;
            Ok(out)
        })
        .collect::<Result<Vec<_>>>()
}

pub fn par_determinants<T: Real>(matrices: &[Matrix<T>], config: &KernelConfig) -> Vec<T> {
    log::debug!("computing {} determinants", matrices.len());
    matrices.par_iter().map(|m| m.det_with(config)).collect()
}

/// Populate `cache` with identity matrices of the given sizes from the thread
/// pool. Duplicate sizes resolve to the same shared matrix.
pub fn par_prewarm_identities<T: Scalar>(cache: &FactoryCache, sizes: &[usize]) -> Vec<Arc<Matrix<T>>> {
    sizes
        .par_iter()
        .map(|&size| IdentityMatrix::<T>::make(cache, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;

    #[test]
    fn multiply_reports_first_mismatch() {
        let ok = (Matrix::from([[1.0, 2.0]]), Matrix::from([[3.0], [4.0]]));
        let bad = (Matrix::from([[1.0, 2.0]]), Matrix::from([[3.0, 4.0]]));
        let err = par_multiply(&[ok, bad]).unwrap_err();
        assert!(matches!(err, MathError::DimensionMismatch { op: "multiply", .. }));
    }

    #[test]
    fn apply_keeps_input_order() {
        let scale = Matrix::from([[2.0, 0.0], [0.0, 3.0]]);
        let vectors: Vec<Vector<f64>> = (0..16).map(|i| Vector::from([i as f64, 1.0])).collect();
        let out = par_apply(&scale, &vectors).unwrap();
        for (i, v) in out.iter().enumerate() {
            assert_eq!(v.as_slice(), &[2.0 * i as f64, 3.0]);
        }
    }
}
