use std::f64::consts::PI;
use std::marker::PhantomData;

use num_traits::NumCast;

use crate::factory::{identity_matrix, FactoryKind, MatrixFactory};
use crate::math::{Matrix, Real};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    CounterClockwise,
    Clockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

/// Parameters of a plane rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub angle: f64,
    pub size: usize,
    pub direction: Direction,
    pub unit: AngleUnit,
}

impl Rotation {
    pub fn degrees(angle: f64) -> Self {
        Self {
            angle,
            size: 2,
            direction: Direction::CounterClockwise,
            unit: AngleUnit::Degrees,
        }
    }

    pub fn radians(angle: f64) -> Self {
        Self {
            unit: AngleUnit::Radians,
            ..Self::degrees(angle)
        }
    }

    pub fn clockwise(mut self) -> Self {
        self.direction = Direction::Clockwise;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Signed angle in radians, counter-clockwise positive.
    pub fn signed_radians(&self) -> f64 {
        let rads = match self.unit {
            AngleUnit::Degrees => self.angle * PI / 180.0,
            AngleUnit::Radians => self.angle,
        };
        let signed = match self.direction {
            Direction::CounterClockwise => rads,
            Direction::Clockwise => -rads,
        };
        // Fold -0.0 into 0.0 so both share a cache key.
        if signed == 0.0 {
            0.0
        } else {
            signed
        }
    }
}

/// Rotation matrix for `rotation`.
///
/// A size of 2 gives `[[cos, -sin], [sin, cos]]`. Larger sizes rotate the
/// plane of the first two axes and leave the remaining axes fixed; sizes
/// below 2 have no plane to rotate and yield the identity.
pub fn rotation_matrix<T: Real>(rotation: &Rotation) -> Matrix<T> {
    let mut rotmat = identity_matrix::<T>(rotation.size);
    if rotation.size < 2 {
        return rotmat;
    }
    let theta: T = <T as NumCast>::from(rotation.signed_radians()).unwrap_or_else(T::zero);
    let (sin, cos) = theta.sin_cos();
    let plane = Matrix::from([[cos, -sin], [sin, cos]]);
    rotmat.impose(&plane, 0, 0);
    rotmat
}

/// Memoized rotation matrices, keyed by size and angle.
pub struct RotationMatrix<T>(PhantomData<T>);

impl<T: Real> MatrixFactory for RotationMatrix<T> {
    type Params = Rotation;
    type Elem = T;

    const KIND: FactoryKind = FactoryKind::Rotation;

    fn encode(rotation: &Rotation) -> u128 {
        ((rotation.size as u128) << 64) | rotation.signed_radians().to_bits() as u128
    }

    fn build(rotation: &Rotation) -> Matrix<T> {
        rotation_matrix(rotation)
    }
}
