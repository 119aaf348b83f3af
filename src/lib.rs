//! matkern: a dense matrix and vector kernel.
//!
//! This crate provides owned row-major `Matrix` and `Vector` containers with
//! arithmetic operators, the usual linear-algebra workhorses (determinant,
//! Gauss-Jordan inversion, LU decomposition, transpose) and memoized factory
//! matrices (identity, rotation, transpose offsets) behind a thread-safe cache.
//!
//! The design favors small, testable modules. Operators panic on broken
//! preconditions the same way slice indexing does; every such operator has a
//! `try_*` counterpart returning [`error::Result`].
pub mod batch;
pub mod config;
pub mod error;
pub mod factory;
pub mod linalg;
pub mod math;

pub use config::{KernelConfig, Pivoting};
pub use error::{MathError, Result};
pub use factory::{FactoryCache, IdentityMatrix, MatrixFactory, OffsetMatrix, RotationMatrix};
pub use linalg::{Lu, PivotedLu};
pub use math::{Matrix, Real, Scalar, Vector};
