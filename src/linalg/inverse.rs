use crate::config::{KernelConfig, Pivoting};
use crate::error::{MathError, Result};
use crate::factory::identity_matrix;
use crate::linalg::{divide_row, largest_in_column, leading_index, subtract_scaled_row};
use crate::math::{Matrix, Real};

impl<T: Real> Matrix<T> {
    pub fn invertible(&self) -> bool {
        self.is_square() && self.is_valid() && !self.det().is_zero()
    }

    pub fn inverted(&self) -> Result<Matrix<T>> {
        self.inverted_with(&KernelConfig::default())
    }

    /// Inverse by Gauss-Jordan elimination (`[A|I] -> [I|A^-1]`), with closed
    /// forms for 1x1 and 2x2 matrices.
    pub fn inverted_with(&self, config: &KernelConfig) -> Result<Matrix<T>> {
        if !self.is_square() {
            return Err(MathError::NotSquare {
                width: self.width(),
                height: self.height(),
            });
        }
        if !self.is_valid() {
            return Err(MathError::Empty);
        }

        let det = self.det_with(config);
        if det.is_zero() {
            log::debug!("refusing to invert a singular {}x{} matrix", self.height(), self.width());
            return Err(MathError::Singular);
        }

        match self.width() {
            1 => Ok(Matrix::with_size(1, T::one() / det)),
            2 => {
                let mut inverse = self.clone();
                inverse.set(0, 0, self.element(1, 1));
                inverse.set(1, 1, self.element(0, 0));
                inverse.set(0, 1, -self.element(0, 1));
                inverse.set(1, 0, -self.element(1, 0));
                inverse /= det;
                Ok(inverse)
            }
            _ => gauss_jordan(self.clone(), config.pivoting),
        }
    }

    /// Invert in place. On error `self` is left untouched.
    pub fn invert(&mut self) -> Result<()> {
        *self = self.inverted()?;
        Ok(())
    }

    /// Inverse, or an identity of the same height when the matrix cannot be
    /// inverted. Prefer [`Matrix::inverted`]; this keeps the historical
    /// fallback for callers that depend on it.
    pub fn inverted_or_identity(&self) -> Matrix<T> {
        match self.inverted() {
            Ok(inverse) => inverse,
            Err(err) => {
                log::warn!("matrix inversion failed ({err}), substituting identity");
                identity_matrix(self.height())
            }
        }
    }
}

fn gauss_jordan<T: Real>(mut work: Matrix<T>, pivoting: Pivoting) -> Result<Matrix<T>> {
    let n = work.height();
    let mut inverse = identity_matrix::<T>(n);

    // Forward pass to row echelon form with unit pivots.
    for col in 0..n {
        let pivot_row = match pivoting {
            Pivoting::None => (col..n).find(|&r| leading_index(work.row(r)) == Some(col)),
            Pivoting::Partial => Some(largest_in_column(&work, col, col)),
        }
        .ok_or(MathError::Singular)?;

        work.swap_rows(col, pivot_row);
        inverse.swap_rows(col, pivot_row);

        let pivot = work.element(col, col);
        if pivot.is_zero() {
            return Err(MathError::Singular);
        }
        divide_row(&mut inverse, col, pivot);
        divide_row(&mut work, col, pivot);
        work.set(col, col, T::one());

        for row in col + 1..n {
            if leading_index(work.row(row)) != Some(col) {
                continue;
            }
            let factor = work.element(row, col);
            subtract_scaled_row(&mut work, row, col, factor);
            subtract_scaled_row(&mut inverse, row, col, factor);
            work.set(row, col, T::zero());
        }
    }

    // Backward pass clearing everything above the diagonal.
    for col in (1..n).rev() {
        for row in 0..col {
            let factor = work.element(row, col);
            if factor.is_zero() {
                continue;
            }
            subtract_scaled_row(&mut work, row, col, factor);
            subtract_scaled_row(&mut inverse, row, col, factor);
            work.set(row, col, T::zero());
        }
    }

    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_index_matching_reorders_rows() {
        let m = Matrix::from([[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
        let plain = KernelConfig::new(5, Pivoting::None);
        let inverse = m.inverted_with(&plain).unwrap();
        assert!((&m * &inverse).is_identity());
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let m = Matrix::from([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]]);
        assert_eq!(m.inverted(), Err(MathError::Singular));
        assert!(m.inverted_or_identity().is_identity());
    }
}
