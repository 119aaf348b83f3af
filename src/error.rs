use thiserror::Error;

/// Result type alias used by the checked kernel operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// Errors reported by the checked (`try_*`) operations and the algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// A flat buffer does not fit the requested shape.
    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    /// Operand shapes are incompatible for `op`. Shapes are `(height, width)`.
    #[error("cannot {op} a {}x{} matrix with a {}x{} operand", lhs.0, lhs.1, rhs.0, rhs.1)]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Vector operands of different lengths.
    #[error("vector length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("operation requires a square matrix, got {height}x{width}")]
    NotSquare { width: usize, height: usize },

    #[error("matrix is singular")]
    Singular,

    /// LU decomposition met a zero on the diagonal of `column`.
    #[error("zero pivot in column {column}")]
    ZeroPivot { column: usize },

    #[error("operation requires a non-empty matrix")]
    Empty,
}
