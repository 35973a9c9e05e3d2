//! Error types for event catalogs.

use thiserror::Error;

/// Errors that can occur while reading or filtering a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog JSON is malformed.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A row index does not exist in the catalog.
    #[error("row {index} out of range for catalog of {len} events")]
    IndexOutOfRange {
        /// Requested row.
        index: usize,
        /// Number of events.
        len: usize,
    },

    /// An event needed for time filtering has no origin time.
    #[error("event at row {0} has no origin time")]
    MissingTime(usize),

    /// Declustering intervals are inconsistent.
    #[error("min_interval ({min_interval} s) must be less than window_length ({window_length} s)")]
    InvalidInterval {
        /// Exclusion window in seconds.
        window_length: f64,
        /// Minimum interval in seconds.
        min_interval: f64,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
