use std::fmt;
use std::iter::FromIterator;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use std::slice::Iter;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, Result};
use crate::math::scalar::{Real, Scalar};

/// Owned, resizable 1-D numeric buffer.
///
/// The index of the first non-zero element (the pivot) is cached; mutations
/// that can change which entries are zero clear the cache.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vector<T> {
    data: Vec<T>,
    #[serde(skip)]
    pivot_index: Option<usize>,
}

impl<T> Vector<T> {
    /// A vector without elements. It reports `is_valid() == false`.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            pivot_index: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A vector is valid once it owns at least one element.
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the elements. Clears the pivot cache.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.pivot_index = None;
        &mut self.data
    }

    pub fn swap(&mut self, other: &mut Vector<T>) {
        std::mem::swap(self, other);
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    pub(crate) fn replace_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.pivot_index = None;
    }
}

impl<T: Scalar> Vector<T> {
    pub fn new(size: usize, fill: T) -> Self {
        Self {
            data: vec![fill; size],
            pivot_index: None,
        }
    }

    pub fn zeros(size: usize) -> Self {
        Self::new(size, T::zero())
    }

    pub fn from_slice(values: &[T]) -> Self {
        Self::from(values.to_vec())
    }

    /// Index of the first non-zero element, or `None` when every element is
    /// zero. With `recalc == false` a cached index is returned as is.
    pub fn pivot(&mut self, recalc: bool) -> Option<usize> {
        if recalc || self.pivot_index.is_none() {
            self.pivot_index = self.first_nonzero();
        }
        self.pivot_index
    }

    /// Uncached pivot lookup for shared references.
    pub fn first_nonzero(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_zero())
    }

    pub fn x(&self) -> Option<T> {
        self.data.first().copied()
    }

    pub fn y(&self) -> Option<T> {
        self.data.get(1).copied()
    }

    pub fn z(&self) -> Option<T> {
        self.data.get(2).copied()
    }

    pub fn w(&self) -> Option<T> {
        self.data.get(3).copied()
    }

    /// Copy `other` into `self` starting at `offset`. Elements that would
    /// land past the end of `self` are dropped.
    pub fn impose(&mut self, other: &Vector<T>, offset: usize) {
        if offset >= self.len() {
            return;
        }
        let n = other.len().min(self.len() - offset);
        self.data[offset..offset + n].copy_from_slice(&other.data[..n]);
        self.pivot_index = None;
    }

    pub fn resize(&mut self, size: usize, fill: T) {
        self.data.resize(size, fill);
        self.pivot_index = None;
    }

    pub fn dot(&self, other: &Vector<T>) -> T {
        assert_eq!(
            self.len(),
            other.len(),
            "Dot product requires equal length vectors"
        );
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    pub fn try_add_assign(&mut self, other: &Vector<T>) -> Result<()> {
        self.check_len(other)?;
        *self += other;
        Ok(())
    }

    pub fn try_sub_assign(&mut self, other: &Vector<T>) -> Result<()> {
        self.check_len(other)?;
        *self -= other;
        Ok(())
    }

    fn check_len(&self, other: &Vector<T>) -> Result<()> {
        if self.len() != other.len() {
            return Err(MathError::LengthMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        Ok(())
    }
}

impl<T: Real> Vector<T> {
    /// Euclidean norm.
    pub fn mag(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &v| acc + v * v)
            .sqrt()
    }

    pub fn approx_eq(&self, other: &Vector<T>, tolerance: T) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() <= tolerance)
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        let pivot_index = data.iter().position(|v| !v.is_zero());
        Self { data, pivot_index }
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Vector<T> {
    fn from(values: [T; N]) -> Self {
        Self::from(values.to_vec())
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(value: Vector<T>) -> Self {
        value.data
    }
}

impl<T: Scalar> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.pivot_index = None;
        &mut self.data[index]
    }
}

impl<'a, T: Scalar> AddAssign<&'a Vector<T>> for Vector<T> {
    fn add_assign(&mut self, rhs: &'a Vector<T>) {
        assert_eq!(
            self.len(),
            rhs.len(),
            "Vector addition requires equal length vectors"
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a += b;
        }
        self.pivot_index = None;
    }
}

impl<'a, T: Scalar> SubAssign<&'a Vector<T>> for Vector<T> {
    fn sub_assign(&mut self, rhs: &'a Vector<T>) {
        assert_eq!(
            self.len(),
            rhs.len(),
            "Vector subtraction requires equal length vectors"
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a -= b;
        }
        self.pivot_index = None;
    }
}

impl<T: Scalar> MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, scalar: T) {
        for v in self.data.iter_mut() {
            *v *= scalar;
        }
        // Truncation and underflow can zero out entries.
        self.pivot_index = None;
    }
}

impl<T: Scalar> DivAssign<T> for Vector<T> {
    /// Dividing by zero leaves the vector untouched.
    fn div_assign(&mut self, scalar: T) {
        if scalar.is_zero() {
            return;
        }
        for v in self.data.iter_mut() {
            *v /= scalar;
        }
        self.pivot_index = None;
    }
}

impl<'a, 'b, T: Scalar> Add<&'b Vector<T>> for &'a Vector<T> {
    type Output = Vector<T>;

    fn add(self, rhs: &'b Vector<T>) -> Self::Output {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl<'a, 'b, T: Scalar> Sub<&'b Vector<T>> for &'a Vector<T> {
    type Output = Vector<T>;

    fn sub(self, rhs: &'b Vector<T>) -> Self::Output {
        let mut diff = self.clone();
        diff -= rhs;
        diff
    }
}

impl<'a, T: Scalar> Mul<T> for &'a Vector<T> {
    type Output = Vector<T>;

    fn mul(self, scalar: T) -> Self::Output {
        let mut product = self.clone();
        product *= scalar;
        product
    }
}

impl<T: Scalar> Mul<T> for Vector<T> {
    type Output = Vector<T>;

    fn mul(mut self, scalar: T) -> Self::Output {
        self *= scalar;
        self
    }
}

impl<'a, T: Scalar> Div<T> for &'a Vector<T> {
    type Output = Vector<T>;

    fn div(self, scalar: T) -> Self::Output {
        let mut quotient = self.clone();
        quotient /= scalar;
        quotient
    }
}

impl<T: Scalar> Div<T> for Vector<T> {
    type Output = Vector<T>;

    fn div(mut self, scalar: T) -> Self::Output {
        self /= scalar;
        self
    }
}

impl<'a, T: Scalar + Neg<Output = T>> Neg for &'a Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Self::Output {
        Vector {
            data: self.data.iter().map(|&v| -v).collect(),
            pivot_index: self.pivot_index,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ",")?;
            }
        }
        write!(f, "]")
    }
}
