use std::marker::PhantomData;

use crate::factory::{pack_dims, FactoryKind, MatrixFactory};
use crate::math::{Matrix, Scalar};

/// Square identity matrix of the given size, built without the cache.
pub fn identity_matrix<T: Scalar>(size: usize) -> Matrix<T> {
    let mut unit = Matrix::with_size(size, T::zero());
    for i in 0..size {
        unit.set(i, i, T::one());
    }
    unit
}

/// Memoized identity matrices, keyed by size.
pub struct IdentityMatrix<T>(PhantomData<T>);

impl<T: Scalar> MatrixFactory for IdentityMatrix<T> {
    type Params = usize;
    type Elem = T;

    const KIND: FactoryKind = FactoryKind::Identity;

    fn encode(size: &usize) -> u128 {
        pack_dims(*size, *size)
    }

    fn build(size: &usize) -> Matrix<T> {
        identity_matrix(*size)
    }
}
