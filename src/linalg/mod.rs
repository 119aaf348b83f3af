//! Linear-algebra algorithms layered on top of `Matrix`.
//!
//! Determinant, inversion, LU decomposition and transpose are exposed as
//! inherent methods on `Matrix` (each in its own file); the helpers below are
//! the row operations they share.
pub mod determinant;
pub mod inverse;
pub mod lu;
pub mod transpose;

pub use lu::{Lu, PivotedLu};
pub use transpose::transpose_with_offsets;

use crate::math::{Matrix, Real, Scalar};

/// Column index of the first non-zero entry of `row`.
pub(crate) fn leading_index<T: Scalar>(row: &[T]) -> Option<usize> {
    row.iter().position(|v| !v.is_zero())
}

/// Row in `from..height` holding the largest magnitude in column `col`. Ties
/// keep the earliest row.
pub(crate) fn largest_in_column<T: Real>(mat: &Matrix<T>, col: usize, from: usize) -> usize {
    let mut best = from;
    let mut best_abs = T::zero();
    for row in from..mat.height() {
        let candidate = mat.element(row, col).abs();
        if candidate > best_abs {
            best = row;
            best_abs = candidate;
        }
    }
    best
}

/// `mat[target] -= factor * mat[source]`, across the whole row.
pub(crate) fn subtract_scaled_row<T: Scalar>(
    mat: &mut Matrix<T>,
    target: usize,
    source: usize,
    factor: T,
) {
    for c in 0..mat.width() {
        let s = mat.element(source, c);
        *mat.element_mut(target, c) -= factor * s;
    }
}

/// `mat[row] /= divisor`.
pub(crate) fn divide_row<T: Scalar>(mat: &mut Matrix<T>, row: usize, divisor: T) {
    for v in mat.row_mut(row) {
        *v /= divisor;
    }
}
