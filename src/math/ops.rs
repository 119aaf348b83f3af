//! Arithmetic for `Matrix`.
//!
//! The operator impls panic when their shape precondition is broken, like
//! slice indexing does. The `try_*` methods check the same preconditions and
//! report a `MathError` instead.
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::NumCast;

use crate::config::KernelConfig;
use crate::error::{MathError, Result};
use crate::math::matrix::Matrix;
use crate::math::scalar::{Real, Scalar};
use crate::math::vector::Vector;

impl<T: Scalar> Matrix<T> {
    /// Row-by-column product buffer. Caller guarantees `self.width() == rhs.height()`.
    fn product(&self, rhs: &Matrix<T>) -> Vec<T> {
        let mut out = Vec::with_capacity(self.height() * rhs.width());
        for r in 0..self.height() {
            let row = self.row(r);
            for c in 0..rhs.width() {
                let mut acc = T::zero();
                for (i, &a) in row.iter().enumerate() {
                    acc += a * rhs.element(i, c);
                }
                out.push(acc);
            }
        }
        out
    }

    fn check_product(&self, rhs: &Matrix<T>) -> Result<()> {
        if self.width() != rhs.height() {
            return Err(MathError::DimensionMismatch {
                op: "multiply",
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        Ok(())
    }

    fn check_same_shape(&self, rhs: &Matrix<T>, op: &'static str) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(MathError::DimensionMismatch {
                op,
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        Ok(())
    }

    /// Combine `rhs` into `self` element by element. Equal shapes walk the
    /// flat buffers; otherwise only the overlapping rectangle is touched.
    fn zip_in_place<F>(&mut self, rhs: &Matrix<T>, mut f: F)
    where
        F: FnMut(&mut T, T),
    {
        if self.shape() == rhs.shape() {
            for (a, &b) in self.as_mut_slice().iter_mut().zip(rhs.as_slice().iter()) {
                f(a, b);
            }
            return;
        }
        let rows = self.height().min(rhs.height());
        let cols = self.width().min(rhs.width());
        for r in 0..rows {
            for c in 0..cols {
                f(self.element_mut(r, c), rhs.element(r, c));
            }
        }
    }

    pub fn try_mul(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_product(rhs)?;
        Matrix::from_shape_vec((self.height(), rhs.width()), self.product(rhs))
    }

    pub fn try_mul_assign(&mut self, rhs: &Matrix<T>) -> Result<()> {
        self.check_product(rhs)?;
        *self *= rhs;
        Ok(())
    }

    pub fn try_add(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_shape(rhs, "add")?;
        Ok(self + rhs)
    }

    pub fn try_sub(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_shape(rhs, "subtract")?;
        Ok(self - rhs)
    }

    /// Multiply `vec`, taken as a column vector, by this matrix. The vector
    /// receives a new buffer of length `height()`; the matrix is unchanged.
    pub fn apply(&self, vec: &mut Vector<T>) {
        assert_eq!(
            self.width(),
            vec.len(),
            "Matrix-vector product requires the vector length to equal the matrix width"
        );
        let data: Vec<T> = self
            .rows()
            .map(|row| {
                row.iter()
                    .zip(vec.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect();
        vec.replace_data(data);
    }

    pub fn try_apply(&self, vec: &mut Vector<T>) -> Result<()> {
        if self.width() != vec.len() {
            return Err(MathError::DimensionMismatch {
                op: "apply",
                lhs: self.shape(),
                rhs: (vec.len(), 1),
            });
        }
        self.apply(vec);
        Ok(())
    }
}

impl<T: Real> Matrix<T> {
    /// Checked product followed by the configured cleanup of residual noise.
    pub fn mul_with(&self, rhs: &Matrix<T>, config: &KernelConfig) -> Result<Matrix<T>> {
        let mut product = self.try_mul(rhs)?;
        if let Some(epsilon) = config.cleanup_epsilon.and_then(<T as NumCast>::from) {
            product.clean(epsilon);
        }
        Ok(product)
    }
}

impl<T: Scalar> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, scalar: T) {
        for v in self.as_mut_slice() {
            *v *= scalar;
        }
    }
}

impl<T: Scalar> DivAssign<T> for Matrix<T> {
    /// Dividing by zero leaves the matrix untouched.
    fn div_assign(&mut self, scalar: T) {
        if scalar.is_zero() {
            return;
        }
        for v in self.as_mut_slice() {
            *v /= scalar;
        }
    }
}

impl<'a, T: Scalar> MulAssign<&'a Matrix<T>> for Matrix<T> {
    fn mul_assign(&mut self, rhs: &'a Matrix<T>) {
        assert_eq!(
            self.width(),
            rhs.height(),
            "Matrix product requires lhs width to equal rhs height"
        );
        let data = self.product(rhs);
        let height = self.height();
        self.replace_buffer(data, rhs.width(), height);
    }
}

impl<'a, T: Scalar> AddAssign<&'a Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &'a Matrix<T>) {
        self.zip_in_place(rhs, |a, b| *a += b);
    }
}

impl<'a, T: Scalar> SubAssign<&'a Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &'a Matrix<T>) {
        self.zip_in_place(rhs, |a, b| *a -= b);
    }
}

impl<'a, 'b, T: Scalar> Mul<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &'b Matrix<T>) -> Self::Output {
        let mut product = self.clone();
        product *= rhs;
        product
    }
}

impl<'b, T: Scalar> Mul<&'b Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(mut self, rhs: &'b Matrix<T>) -> Self::Output {
        self *= rhs;
        self
    }
}

impl<'a, 'b, T: Scalar> Mul<&'b Vector<T>> for &'a Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &'b Vector<T>) -> Self::Output {
        let mut product = rhs.clone();
        self.apply(&mut product);
        product
    }
}

impl<'a, 'b, T: Scalar> Add<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &'b Matrix<T>) -> Self::Output {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl<'a, 'b, T: Scalar> Sub<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &'b Matrix<T>) -> Self::Output {
        let mut diff = self.clone();
        diff -= rhs;
        diff
    }
}

impl<'a, T: Scalar> Mul<T> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, scalar: T) -> Self::Output {
        let mut product = self.clone();
        product *= scalar;
        product
    }
}

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(mut self, scalar: T) -> Self::Output {
        self *= scalar;
        self
    }
}

impl<'a, T: Scalar> Div<T> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, scalar: T) -> Self::Output {
        let mut quotient = self.clone();
        quotient /= scalar;
        quotient
    }
}

impl<T: Scalar> Div<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn div(mut self, scalar: T) -> Self::Output {
        self /= scalar;
        self
    }
}

impl<'a, T: Scalar + Neg<Output = T>> Neg for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Self::Output {
        self.map(|&v| -v)
    }
}
