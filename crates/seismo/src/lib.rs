#![warn(missing_docs)]

//! seismo: cross sections and geometric selection for seismic catalogs.
//!
//! Ties the building blocks together:
//!
//! - [`cross_sections`] projects a [`Catalog`], builds a family of parallel
//!   sections around a center and returns the events of each section with
//!   their on-section coordinates
//! - [`select_on_map`] and [`select_on_section`] pick events inside a
//!   circle, oval or rectangle
//!
//! Settings are plain serde structs that can be read from TOML.
//!
//! # Example
//!
//! ```no_run
//! use seismo::{cross_sections, Catalog, SectionSettings};
//!
//! let catalog = Catalog::load("events.json")?;
//! let settings = SectionSettings::load("sections.toml")?;
//! for section in cross_sections(&catalog, &settings)? {
//!     println!("section {}: {} events", section.frame.index, section.len());
//! }
//! # Ok::<(), seismo::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod sections;
pub mod selection;

pub use config::{MapSelection, ProjectionSettings, SectionSelection, SectionSettings};
pub use error::{Error, Result};
pub use sections::{cross_sections, CatalogSection, SectionRecord};
pub use selection::{select_on_map, select_on_section, Selection};

pub use seismo_catalog::{exclude_close_timed_events, Catalog, Event};
pub use seismo_geo::{project, unproject, PlanarProjector};
pub use seismo_select::{ShapeKind, ShapeSize};

pub use seismo_catalog as catalog;
pub use seismo_geo as geo;
pub use seismo_math as math;
pub use seismo_section as section;
pub use seismo_select as select;
