use crate::error::{MathError, Result};
use crate::factory::{FactoryCache, MatrixFactory, OffsetMatrix};
use crate::math::{Matrix, Scalar};

impl<T: Scalar> Matrix<T> {
    /// Transpose in place. Square matrices swap elements pairwise; other
    /// shapes are rebuilt into a new `width x height` buffer.
    pub fn transpose(&mut self) {
        let (width, height) = (self.width(), self.height());
        if width == height {
            let data = self.as_mut_slice();
            for r in 0..height {
                for c in r + 1..width {
                    data.swap(r * width + c, c * width + r);
                }
            }
            return;
        }

        let mut data = Vec::with_capacity(self.len());
        for c in 0..width {
            for r in 0..height {
                data.push(self.element(r, c));
            }
        }
        self.replace_buffer(data, height, width);
    }

    pub fn transposed(&self) -> Matrix<T> {
        let mut trans = self.clone();
        trans.transpose();
        trans
    }

    /// Transposed copy driven by the memoized offset table for this shape.
    pub fn transposed_cached(&self, cache: &FactoryCache) -> Matrix<T> {
        let offsets = OffsetMatrix::make(cache, (self.width(), self.height()));
        scatter(self, &offsets)
    }
}

/// Scatter every element of `mat` to `index + offsets[index]`, producing the
/// transpose. `offsets` must have the same shape as `mat`.
pub fn transpose_with_offsets<T: Scalar>(mat: &Matrix<T>, offsets: &Matrix<isize>) -> Result<Matrix<T>> {
    if offsets.shape() != mat.shape() {
        return Err(MathError::DimensionMismatch {
            op: "transpose",
            lhs: mat.shape(),
            rhs: offsets.shape(),
        });
    }
    Ok(scatter(mat, offsets))
}

/// Caller guarantees `offsets` was built for the shape of `mat`.
fn scatter<T: Scalar>(mat: &Matrix<T>, offsets: &Matrix<isize>) -> Matrix<T> {
    let mut trans = Matrix::zeros(mat.height(), mat.width());
    let data = trans.as_mut_slice();
    for (index, (&value, &delta)) in mat.as_slice().iter().zip(offsets.as_slice()).enumerate() {
        let target = index as isize + delta;
        data[target as usize] = value;
    }
    trans
}
