use crate::error::{MathError, Result};
use crate::factory::identity_matrix;
use crate::linalg::{largest_in_column, subtract_scaled_row};
use crate::math::{Matrix, Real, Vector};

/// Result of [`Matrix::decompose`]: `lower * upper` reproduces the input when
/// the decomposition ran to completion.
#[derive(Clone, Debug, PartialEq)]
pub struct Lu<T> {
    pub lower: Matrix<T>,
    pub upper: Matrix<T>,
    /// Column whose zero pivot stopped the elimination, if any.
    pub zero_pivot: Option<usize>,
}

impl<T: Real> Lu<T> {
    pub fn is_complete(&self) -> bool {
        self.zero_pivot.is_none()
    }

    pub fn reconstruct(&self) -> Matrix<T> {
        &self.lower * &self.upper
    }
}

/// LU decomposition with partial pivoting: `P * A = lower * upper`, where row
/// `i` of `P * A` is row `permutation[i]` of `A`.
#[derive(Clone, Debug, PartialEq)]
pub struct PivotedLu<T> {
    pub lower: Matrix<T>,
    pub upper: Matrix<T>,
    permutation: Vec<usize>,
    swaps: usize,
}

impl<T: Real> PivotedLu<T> {
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn permutation_matrix(&self) -> Matrix<T> {
        let n = self.permutation.len();
        let mut p = Matrix::zeros(n, n);
        for (row, &src) in self.permutation.iter().enumerate() {
            p.set(row, src, T::one());
        }
        p
    }

    pub fn determinant(&self) -> T {
        let sign = if self.swaps % 2 == 0 { T::one() } else { -T::one() };
        (0..self.upper.height()).fold(sign, |acc, i| acc * self.upper.element(i, i))
    }

    /// Rebuild the input matrix by undoing the row permutation of
    /// `lower * upper`.
    pub fn reconstruct(&self) -> Matrix<T> {
        let permuted = &self.lower * &self.upper;
        let mut rebuilt = Matrix::zeros(permuted.width(), permuted.height());
        for (row, &src) in self.permutation.iter().enumerate() {
            rebuilt.row_mut(src).copy_from_slice(permuted.row(row));
        }
        rebuilt
    }

    /// Solve `A * x = b` by forward and backward substitution.
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>> {
        let n = self.permutation.len();
        if b.len() != n {
            return Err(MathError::LengthMismatch {
                expected: n,
                got: b.len(),
            });
        }

        let mut y = Vec::with_capacity(n);
        for i in 0..n {
            let mut acc = b[self.permutation[i]];
            for (j, &yj) in y.iter().enumerate() {
                acc -= self.lower.element(i, j) * yj;
            }
            y.push(acc);
        }

        let mut x = vec![T::zero(); n];
        for i in (0..n).rev() {
            let diag = self.upper.element(i, i);
            if diag.is_zero() {
                return Err(MathError::Singular);
            }
            let mut acc = y[i];
            for j in i + 1..n {
                acc -= self.upper.element(i, j) * x[j];
            }
            x[i] = acc / diag;
        }
        Ok(Vector::from(x))
    }
}

impl<T: Real> Matrix<T> {
    /// Doolittle LU decomposition without pivoting.
    ///
    /// `lower` starts as the identity and collects the elimination
    /// multipliers; `upper` starts as a copy of `self` and is reduced in
    /// place. A zero pivot with non-zero entries below it stops the
    /// elimination early and is reported through [`Lu::zero_pivot`].
    pub fn decompose(&self) -> Lu<T> {
        let rows = self.height();
        let mut lower = identity_matrix::<T>(rows);
        let mut upper = self.clone();
        let steps = rows.min(self.width());

        for col in 0..steps {
            let pivot = upper.element(col, col);
            if pivot.is_zero() {
                if (col + 1..rows).all(|r| upper.element(r, col).is_zero()) {
                    continue;
                }
                log::debug!("LU decomposition stopped at zero pivot in column {col}");
                return Lu {
                    lower,
                    upper,
                    zero_pivot: Some(col),
                };
            }
            for row in col + 1..rows {
                let value = upper.element(row, col);
                if value.is_zero() {
                    continue;
                }
                let factor = value / pivot;
                lower.set(row, col, factor);
                subtract_scaled_row(&mut upper, row, col, factor);
                upper.set(row, col, T::zero());
            }
        }

        Lu {
            lower,
            upper,
            zero_pivot: None,
        }
    }

    /// Like [`Matrix::decompose`] but turns early termination into an error.
    pub fn try_decompose(&self) -> Result<Lu<T>> {
        let lu = self.decompose();
        match lu.zero_pivot {
            Some(column) => Err(MathError::ZeroPivot { column }),
            None => Ok(lu),
        }
    }

    pub fn decompose_pivoted(&self) -> Result<PivotedLu<T>> {
        if !self.is_square() {
            return Err(MathError::NotSquare {
                width: self.width(),
                height: self.height(),
            });
        }
        let n = self.height();
        let mut lower = Matrix::zeros(n, n);
        let mut upper = self.clone();
        let mut permutation: Vec<usize> = (0..n).collect();
        let mut swaps = 0;

        for col in 0..n {
            let pivot_row = largest_in_column(&upper, col, col);
            if pivot_row != col {
                upper.swap_rows(pivot_row, col);
                permutation.swap(pivot_row, col);
                for c in 0..col {
                    let a = lower.element(col, c);
                    lower.set(col, c, lower.element(pivot_row, c));
                    lower.set(pivot_row, c, a);
                }
                swaps += 1;
            }
            let pivot = upper.element(col, col);
            if pivot.is_zero() {
                continue;
            }
            for row in col + 1..n {
                let factor = upper.element(row, col) / pivot;
                lower.set(row, col, factor);
                if !factor.is_zero() {
                    subtract_scaled_row(&mut upper, row, col, factor);
                    upper.set(row, col, T::zero());
                }
            }
        }
        for i in 0..n {
            lower.set(i, i, T::one());
        }

        Ok(PivotedLu {
            lower,
            upper,
            permutation,
            swaps,
        })
    }
}
