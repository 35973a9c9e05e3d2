//! Error types for section building and slicing.

use seismo_geo::GeoError;
use thiserror::Error;

/// Errors that can occur while building or slicing sections.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SectionError {
    /// Section spacing must be strictly positive.
    #[error("section spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    /// Strike must be a finite angle.
    #[error("strike must be a finite angle in degrees, got {0}")]
    InvalidStrike(f64),

    /// Distance or extent filter is not usable.
    #[error("invalid slice filter: {0}")]
    InvalidFilter(String),

    /// Depth range bounds are reversed or not finite.
    #[error("invalid depth range [{min}, {max}]")]
    InvalidDepthRange {
        /// Lower bound (km, positive down).
        min: f64,
        /// Upper bound (km, positive down).
        max: f64,
    },

    /// Coordinate and depth arrays have different lengths.
    #[error("dimension mismatch: expected {expected} values, found {found}")]
    DimensionMismatch {
        /// Number of planar points.
        expected: usize,
        /// Number of depths.
        found: usize,
    },

    /// Projection error, including mixed reference systems.
    #[error(transparent)]
    Geo(#[from] GeoError),
}

/// Result type for section operations.
pub type Result<T> = std::result::Result<T, SectionError>;
