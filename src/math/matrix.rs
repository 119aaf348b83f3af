use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{MathError, Result};
use crate::math::scalar::{Real, Scalar};
use crate::math::vector::Vector;

/// Owned dense matrix stored in row-major order.
///
/// `element(row, col)` lives at `data[row * width + col]`. A matrix without
/// a buffer (see [`Matrix::empty`]) is invalid and must not be indexed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Matrix<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    /// Build a matrix from a row-major buffer, checking that the buffer
    /// length matches `rows * cols`.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(MathError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width: cols,
            height: rows,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, cols)`, i.e. `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let start = self.offset(row, 0);
        let width = self.width;
        &mut self.data[start..start + width]
    }

    /// One slice per row, including the empty rows of a zero-width matrix.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        (0..self.height).map(move |r| self.row(r))
    }

    pub fn element_mut(&mut self, row: usize, col: usize) -> &mut T {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        *self.element_mut(row, col) = value;
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let width = self.width;
        let (head, tail) = self.data.split_at_mut(hi * width);
        head[lo * width..(lo + 1) * width].swap_with_slice(&mut tail[..width]);
    }

    pub fn swap(&mut self, other: &mut Matrix<T>) {
        std::mem::swap(self, other);
    }

    pub fn map<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            data: self.data.iter().map(|v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn replace_buffer(&mut self, data: Vec<T>, width: usize, height: usize) {
        debug_assert_eq!(data.len(), width * height);
        self.data = data;
        self.width = width;
        self.height = height;
    }
}

impl<T: Scalar> Matrix<T> {
    /// `width x height` matrix with every element set to `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            data: vec![fill; width * height],
            width,
            height,
        }
    }

    pub fn with_size(size: usize, fill: T) -> Self {
        Self::new(size, size, fill)
    }

    pub fn zeros(width: usize, height: usize) -> Self {
        Self::new(width, height, T::zero())
    }

    /// Build a matrix from nested rows. The height is the number of rows and
    /// the width is the length of the shortest row; longer rows are trimmed.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.as_ref().len()).min().unwrap_or(0);
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            data.extend_from_slice(&row.as_ref()[..width]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// `1 x n` matrix holding the vector as its only row.
    pub fn from_row_vector(vec: &Vector<T>) -> Self {
        Self {
            data: vec.to_vec(),
            width: vec.len(),
            height: 1,
        }
    }

    /// `n x 1` matrix holding the vector as its only column.
    pub fn from_column_vector(vec: &Vector<T>) -> Self {
        Self {
            data: vec.to_vec(),
            width: 1,
            height: vec.len(),
        }
    }

    pub fn element(&self, row: usize, col: usize) -> T {
        self.data[self.offset(row, col)]
    }

    pub fn element_at(&self, index: usize) -> T {
        self.data[index]
    }

    pub fn row_vector(&self, row: usize) -> Vector<T> {
        Vector::from_slice(self.row(row))
    }

    pub fn column(&self, col: usize) -> Vector<T> {
        assert!(col < self.width, "column index out of bounds");
        (0..self.height).map(|row| self.element(row, col)).collect()
    }

    /// True when the matrix is square with exact ones on the diagonal and
    /// exact zeros elsewhere.
    pub fn is_identity(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        self.rows().enumerate().all(|(r, row)| {
            row.iter().enumerate().all(|(c, &v)| {
                if r == c {
                    v == T::one()
                } else {
                    v.is_zero()
                }
            })
        })
    }

    /// Write `other` into `self` with its top-left corner at
    /// `(row_off, col_off)`. Anything falling outside `self` is dropped.
    pub fn impose(&mut self, other: &Matrix<T>, row_off: usize, col_off: usize) {
        if col_off >= self.width {
            return;
        }
        let cols = other.width.min(self.width - col_off);
        for r in 0..other.height {
            let target = r + row_off;
            if target >= self.height {
                break;
            }
            self.row_mut(target)[col_off..col_off + cols].copy_from_slice(&other.row(r)[..cols]);
        }
    }

    /// Write `vec` into row `row` starting at column `col_off`, clipped.
    pub fn impose_vector(&mut self, vec: &Vector<T>, row: usize, col_off: usize) {
        if row >= self.height || col_off >= self.width {
            return;
        }
        let cols = vec.len().min(self.width - col_off);
        self.row_mut(row)[col_off..col_off + cols].copy_from_slice(&vec.as_slice()[..cols]);
    }

    /// Human readable rendering: one bracketed, comma separated row per line.
    pub fn string(&self, newlines: bool) -> String {
        let mut out = String::new();
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            out.push('[');
            out.push_str(&cells.join(","));
            out.push(']');
            if newlines {
                out.push('\n');
            }
        }
        out
    }
}

impl<T: Real> Matrix<T> {
    /// Snap every element smaller than `epsilon` in magnitude to zero.
    pub fn clean(&mut self, epsilon: T) {
        for v in self.data.iter_mut() {
            if v.abs() < epsilon {
                *v = T::zero();
            }
        }
    }

    pub fn approx_eq(&self, other: &Matrix<T>, tolerance: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() <= tolerance)
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Scalar> From<Vec<Vec<T>>> for Matrix<T> {
    fn from(rows: Vec<Vec<T>>) -> Self {
        Self::from_rows(&rows[..])
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T> {
    fn from(rows: [[T; C]; R]) -> Self {
        Self::from_rows(&rows[..])
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

/// Row access, so `m[row][col]` reads naturally.
impl<T> Index<usize> for Matrix<T> {
    type Output = [T];

    fn index(&self, row: usize) -> &Self::Output {
        self.row(row)
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        self.row_mut(row)
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string(true))
    }
}
