use std::fmt;

use num_traits::{Float, Num, NumAssign};

/// Element type accepted by `Vector` and `Matrix`.
///
/// Any `Copy` numeric type with the assigning operators qualifies, which
/// covers the primitive integers and floats.
pub trait Scalar:
    Num + NumAssign + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

impl<T> Scalar for T where
    T: Num + NumAssign + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

/// Floating point scalars, required by the algorithms that divide, take
/// square roots or evaluate trigonometric functions.
pub trait Real: Scalar + Float {}

impl<T> Real for T where T: Scalar + Float {}
