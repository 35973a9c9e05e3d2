//! Error types for coordinate projection.

use thiserror::Error;

/// Errors that can occur while projecting coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Zone, unit, ellipsoid or datum is not valid.
    #[error("invalid projection parameters: {0}")]
    InvalidProjectionParameters(String),

    /// Parallel coordinate arrays have different lengths.
    #[error("dimension mismatch: expected {expected} values, found {found}")]
    DimensionMismatch {
        /// Length of the first array.
        expected: usize,
        /// Length of the offending array.
        found: usize,
    },

    /// Planar coordinates were produced by a different projection.
    #[error("planar coordinates are in {found}, projector expects {expected}")]
    CrsMismatch {
        /// Reference system of the projector.
        expected: String,
        /// Reference system of the input.
        found: String,
    },
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, GeoError>;
