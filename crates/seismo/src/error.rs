//! Crate-level error type.

use seismo_catalog::CatalogError;
use seismo_geo::GeoError;
use seismo_section::SectionError;
use seismo_select::SelectError;
use thiserror::Error;

/// Errors returned by the high-level cross-section and selection API.
#[derive(Error, Debug)]
pub enum Error {
    /// Projection failure.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Frame building or slicing failure.
    #[error(transparent)]
    Section(#[from] SectionError),

    /// Shape selection failure.
    #[error(transparent)]
    Select(#[from] SelectError),

    /// Catalog failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Malformed TOML settings.
    #[error("invalid settings: {0}")]
    Config(#[from] toml::de::Error),

    /// Settings file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the high-level API.
pub type Result<T> = std::result::Result<T, Error>;
