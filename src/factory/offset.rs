use crate::factory::{pack_dims, FactoryKind, MatrixFactory};
use crate::math::Matrix;

/// Transpose offsets for a row-major `width x height` matrix.
///
/// The result has the same shape as the source matrix. The element at flat
/// index `i = r * width + c` moves to `c * height + r` when transposed; the
/// table stores the difference.
pub fn offset_matrix(width: usize, height: usize) -> Matrix<isize> {
    let mut offsets = Matrix::zeros(width, height);
    for r in 0..height {
        for c in 0..width {
            let from = (r * width + c) as isize;
            let to = (c * height + r) as isize;
            offsets.set(r, c, to - from);
        }
    }
    offsets
}

/// Memoized transpose offsets, keyed by `(width, height)`.
pub struct OffsetMatrix;

impl MatrixFactory for OffsetMatrix {
    type Params = (usize, usize);
    type Elem = isize;

    const KIND: FactoryKind = FactoryKind::Offset;

    fn encode(&(width, height): &(usize, usize)) -> u128 {
        pack_dims(width, height)
    }

    fn build(&(width, height): &(usize, usize)) -> Matrix<isize> {
        offset_matrix(width, height)
    }
}
