//! Error types for shape selection.

use thiserror::Error;

/// Errors that can occur while selecting points in a shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    /// A size component is zero, negative, not finite, or has the wrong form.
    #[error("invalid shape size: {0}")]
    InvalidShapeSize(String),

    /// Shape token is not one of `circle`, `oval`, `rectangle`.
    #[error("unsupported shape kind {0:?} (expected circle, oval or rectangle)")]
    UnsupportedShapeKind(String),

    /// Shape rotation must be finite.
    #[error("shape rotation must be finite, got {0}")]
    InvalidRotation(f64),

    /// Coordinate arrays have different lengths.
    #[error("dimension mismatch: expected {expected} values, found {found}")]
    DimensionMismatch {
        /// Number of x coordinates.
        expected: usize,
        /// Number of y coordinates.
        found: usize,
    },
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectError>;
