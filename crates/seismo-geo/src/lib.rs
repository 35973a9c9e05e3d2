#![warn(missing_docs)]

//! Geographic to planar projection for seismic event catalogs.
//!
//! Converts longitude/latitude into UTM eastings and northings in meters
//! or kilometers, and back. Every planar batch is tagged with the
//! [`PlanarCrs`] that produced it so coordinates from different
//! projections are never mixed.
//!
//! # Example
//!
//! ```
//! use seismo_geo::PlanarProjector;
//!
//! let projector = PlanarProjector::utm(33, "km", "WGS84", "WGS84")?;
//! let p = projector.project_point(13.271772, 38.836032);
//! assert!((p.x - 350.0).abs() < 1e-3);
//! assert!((p.y - 4300.0).abs() < 1e-3);
//! # Ok::<(), seismo_geo::GeoError>(())
//! ```

pub mod ellipsoid;
pub mod error;
pub mod planar;
pub mod units;
pub mod utm;

pub use ellipsoid::{Datum, Ellipsoid};
pub use error::{GeoError, Result};
pub use planar::{project, unproject, PlanarCrs, PlanarPoint, PlanarPoints, PlanarProjector};
pub use units::LengthUnit;
pub use utm::{Hemisphere, Projection, TransverseMercator, UtmZone};
