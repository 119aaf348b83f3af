use crate::config::{KernelConfig, Pivoting};
use crate::linalg::largest_in_column;
use crate::math::{Matrix, Real};

impl<T: Real> Matrix<T> {
    /// Determinant with the default configuration.
    ///
    /// Non-square matrices have a determinant of zero by definition here.
    pub fn det(&self) -> T {
        self.det_with(&KernelConfig::default())
    }

    /// Determinant, choosing the algorithm by size:
    ///
    /// * 2x2 uses the closed form `ad - bc`;
    /// * below `config.cofactor_limit`, Laplace expansion along the first row;
    /// * otherwise Gaussian elimination on a scratch copy, with the
    ///   configured pivoting, and the product of the resulting diagonal.
    pub fn det_with(&self, config: &KernelConfig) -> T {
        if !self.is_square() {
            return T::zero();
        }
        match self.width() {
            0 => T::one(),
            1 => self.element(0, 0),
            2 => {
                self.element(0, 0) * self.element(1, 1) - self.element(0, 1) * self.element(1, 0)
            }
            n if n < config.cofactor_limit => {
                log::trace!("determinant of {n}x{n} matrix by cofactor expansion");
                let mut allowed = vec![true; n];
                laplace(self, &mut allowed, n)
            }
            n => {
                log::trace!("determinant of {n}x{n} matrix by elimination");
                elimination(self, config.pivoting)
            }
        }
    }
}

/// Expands the minor formed by the last `size` rows and the columns still
/// marked in `allowed`.
fn laplace<T: Real>(mat: &Matrix<T>, allowed: &mut [bool], size: usize) -> T {
    let n = mat.height();
    if size == 2 {
        let mut cols = allowed
            .iter()
            .enumerate()
            .filter(|(_, &keep)| keep)
            .map(|(idx, _)| idx);
        let (Some(c1), Some(c2)) = (cols.next(), cols.next()) else {
            return T::zero();
        };
        return mat.element(n - 2, c1) * mat.element(n - 1, c2)
            - mat.element(n - 2, c2) * mat.element(n - 1, c1);
    }

    let row = n - size;
    let mut total = T::zero();
    let mut negate = false;
    for col in 0..allowed.len() {
        if !allowed[col] {
            continue;
        }
        let value = mat.element(row, col);
        if !value.is_zero() {
            allowed[col] = false;
            let term = value * laplace(mat, allowed, size - 1);
            allowed[col] = true;
            total = if negate { total - term } else { total + term };
        }
        negate = !negate;
    }
    total
}

fn elimination<T: Real>(mat: &Matrix<T>, pivoting: Pivoting) -> T {
    let n = mat.width();
    let mut work = mat.clone();
    let mut sign = T::one();

    for col in 0..n {
        if pivoting == Pivoting::Partial {
            let pivot_row = largest_in_column(&work, col, col);
            if pivot_row != col {
                work.swap_rows(pivot_row, col);
                sign = -sign;
            }
        }
        let pivot = work.element(col, col);
        if pivot.is_zero() {
            log::trace!("zero pivot in column {col}, determinant is zero");
            return T::zero();
        }
        for row in col + 1..n {
            let factor = work.element(row, col) / pivot;
            if factor.is_zero() {
                continue;
            }
            for c in col..n {
                let v = work.element(col, c);
                *work.element_mut(row, c) -= factor * v;
            }
        }
    }

    (0..n).fold(sign, |acc, i| acc * work.element(i, i))
}
