//! Owned numeric containers used throughout the crate.
//!
//! Provides `Matrix` (2D, row-major) and `Vector` (1D) together with the
//! scalar traits bounding their element types. Arithmetic operators for
//! matrices live in `ops`.
pub mod matrix;
pub mod ops;
pub mod scalar;
pub mod vector;

pub use matrix::Matrix;
pub use scalar::{Real, Scalar};
pub use vector::Vector;

/// Build a [`Matrix`] from nested row literals.
///
/// ```
/// let m = matkern::matrix![[2.0, 4.0], [1.0, 7.0]];
/// assert_eq!(m.shape(), (2, 2));
/// ```
#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),* $(,)?]),+ $(,)?) => {
        $crate::math::Matrix::from(vec![$(vec![$($x),*]),+])
    };
}

/// Build a [`Vector`] from a list of elements.
#[macro_export]
macro_rules! vector {
    ($($x:expr),* $(,)?) => {
        $crate::math::Vector::from(vec![$($x),*])
    };
}
