//! Planar reference systems and the projector that produces them.

use std::fmt;

use rayon::prelude::*;
use seismo_math::Point2;
use serde::{Deserialize, Serialize};

use crate::ellipsoid::{Datum, Ellipsoid};
use crate::error::{GeoError, Result};
use crate::units::LengthUnit;
use crate::utm::{Hemisphere, Projection, TransverseMercator, UtmZone};

/// Describes how a set of planar coordinates was produced.
///
/// Coordinates tagged with different reference systems must never be mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanarCrs {
    /// UTM zone.
    pub zone: UtmZone,
    /// Northing convention.
    pub hemisphere: Hemisphere,
    /// Unit of x and y.
    pub units: LengthUnit,
    /// Ellipsoid used by the projection.
    pub ellipsoid: Ellipsoid,
    /// Datum the geographic coordinates refer to.
    pub datum: Datum,
}

impl PlanarCrs {
    /// Build a reference system, checking that the datum is defined on the
    /// ellipsoid.
    pub fn new(
        zone: UtmZone,
        hemisphere: Hemisphere,
        units: LengthUnit,
        ellipsoid: Ellipsoid,
        datum: Datum,
    ) -> Result<Self> {
        datum.check_ellipsoid(ellipsoid)?;
        Ok(Self {
            zone,
            hemisphere,
            units,
            ellipsoid,
            datum,
        })
    }

    /// Parse a reference system from textual tokens.
    pub fn parse(
        zone: u8,
        hemisphere: Hemisphere,
        units: &str,
        ellipsoid: &str,
        datum: &str,
    ) -> Result<Self> {
        Self::new(
            UtmZone::new(zone)?,
            hemisphere,
            units.parse()?,
            ellipsoid.parse()?,
            datum.parse()?,
        )
    }

    /// Fail with [`GeoError::CrsMismatch`] unless `other` equals `self`.
    pub fn ensure_same(&self, other: &PlanarCrs) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(GeoError::CrsMismatch {
                expected: self.to_string(),
                found: other.to_string(),
            })
        }
    }
}

impl fmt::Display for PlanarCrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hemi = match self.hemisphere {
            Hemisphere::North => "N",
            Hemisphere::South => "S",
        };
        write!(
            f,
            "UTM {}{hemi} [{}] ({}/{})",
            self.zone, self.units, self.ellipsoid, self.datum
        )
    }
}

/// A single point in a planar reference system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    /// Easting.
    pub x: f64,
    /// Northing.
    pub y: f64,
    /// Reference system of `x` and `y`.
    pub crs: PlanarCrs,
}

impl PlanarPoint {
    /// Coordinates as a nalgebra point.
    pub fn to_point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// A column-oriented batch of planar points sharing one reference system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoints {
    /// Eastings.
    pub x: Vec<f64>,
    /// Northings.
    pub y: Vec<f64>,
    /// Reference system of every point.
    pub crs: PlanarCrs,
}

impl PlanarPoints {
    /// Build a batch from parallel arrays.
    pub fn new(x: Vec<f64>, y: Vec<f64>, crs: PlanarCrs) -> Result<Self> {
        if x.len() != y.len() {
            return Err(GeoError::DimensionMismatch {
                expected: x.len(),
                found: y.len(),
            });
        }
        Ok(Self { x, y, crs })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Point at `index`, if any.
    pub fn get(&self, index: usize) -> Option<PlanarPoint> {
        Some(PlanarPoint {
            x: *self.x.get(index)?,
            y: *self.y.get(index)?,
            crs: self.crs,
        })
    }

    /// Iterate over the points as nalgebra points.
    pub fn iter(&self) -> impl Iterator<Item = Point2> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| Point2::new(x, y))
    }

    /// Collect the points as nalgebra points.
    pub fn to_points(&self) -> Vec<Point2> {
        self.iter().collect()
    }
}

/// Converts geographic coordinates into a planar frame with a fixed unit.
///
/// The projection itself is pluggable; [`TransverseMercator`] provides UTM.
#[derive(Debug, Clone)]
pub struct PlanarProjector<P = TransverseMercator> {
    projection: P,
    crs: PlanarCrs,
}

impl PlanarProjector<TransverseMercator> {
    /// UTM projector using the northern (zero false northing) convention.
    pub fn utm(zone: u8, units: &str, ellipsoid: &str, datum: &str) -> Result<Self> {
        Self::utm_with_hemisphere(zone, Hemisphere::North, units, ellipsoid, datum)
    }

    /// UTM projector with an explicit northing convention.
    pub fn utm_with_hemisphere(
        zone: u8,
        hemisphere: Hemisphere,
        units: &str,
        ellipsoid: &str,
        datum: &str,
    ) -> Result<Self> {
        Ok(Self::from_crs(PlanarCrs::parse(
            zone, hemisphere, units, ellipsoid, datum,
        )?))
    }

    /// UTM projector for an already validated reference system.
    pub fn from_crs(crs: PlanarCrs) -> Self {
        Self {
            projection: TransverseMercator::utm(crs.zone, crs.hemisphere, crs.ellipsoid),
            crs,
        }
    }
}

impl<P: Projection> PlanarProjector<P> {
    /// Wrap a custom projection. `crs` is used to tag the output.
    pub fn with_projection(projection: P, crs: PlanarCrs) -> Self {
        Self { projection, crs }
    }

    /// Reference system of the output.
    pub fn crs(&self) -> PlanarCrs {
        self.crs
    }

    /// Project a single point.
    pub fn project_point(&self, lon: f64, lat: f64) -> PlanarPoint {
        let (e, n) = self.projection.forward(lon, lat);
        PlanarPoint {
            x: self.crs.units.scale_from_meters(e),
            y: self.crs.units.scale_from_meters(n),
            crs: self.crs,
        }
    }

    /// Project parallel longitude and latitude arrays.
    pub fn project(&self, lon: &[f64], lat: &[f64]) -> Result<PlanarPoints> {
        if lon.len() != lat.len() {
            return Err(GeoError::DimensionMismatch {
                expected: lon.len(),
                found: lat.len(),
            });
        }

        let units = self.crs.units;
        let (x, y): (Vec<f64>, Vec<f64>) = lon
            .par_iter()
            .zip(lat.par_iter())
            .map(|(&lon, &lat)| {
                let (e, n) = self.projection.forward(lon, lat);
                (units.scale_from_meters(e), units.scale_from_meters(n))
            })
            .unzip();

        log::debug!("projected {} points into {}", x.len(), self.crs);
        Ok(PlanarPoints { x, y, crs: self.crs })
    }

    /// Map a planar point back to `(lon, lat)`.
    pub fn unproject_point(&self, point: &PlanarPoint) -> Result<(f64, f64)> {
        self.crs.ensure_same(&point.crs)?;
        Ok(self.unproject_raw(point.x, point.y))
    }

    /// Map a batch of planar points back to longitude and latitude arrays.
    pub fn unproject(&self, points: &PlanarPoints) -> Result<(Vec<f64>, Vec<f64>)> {
        self.crs.ensure_same(&points.crs)?;
        Ok(self.unproject_slices(&points.x, &points.y))
    }

    fn unproject_raw(&self, x: f64, y: f64) -> (f64, f64) {
        let units = self.crs.units;
        self.projection.inverse(units.scale_to_meters(x), units.scale_to_meters(y))
    }

    fn unproject_slices(&self, x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
        x.par_iter()
            .zip(y.par_iter())
            .map(|(&x, &y)| self.unproject_raw(x, y))
            .unzip()
    }
}

/// Project geographic coordinates to UTM.
///
/// `units` is `"m"` or `"km"`; `ellipsoid` and `datum` are tokens such as
/// `"WGS84"`. Southern latitudes yield negative northings.
pub fn project(
    lon: &[f64],
    lat: &[f64],
    zone: u8,
    units: &str,
    ellipsoid: &str,
    datum: &str,
) -> Result<PlanarPoints> {
    PlanarProjector::utm(zone, units, ellipsoid, datum)?.project(lon, lat)
}

/// Map UTM coordinates back to `(lon, lat)` arrays.
///
/// With `northern == false` the northings are expected to carry the
/// 10 000 km southern false northing.
pub fn unproject(
    x: &[f64],
    y: &[f64],
    zone: u8,
    northern: bool,
    units: &str,
    ellipsoid: &str,
    datum: &str,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if x.len() != y.len() {
        return Err(GeoError::DimensionMismatch {
            expected: x.len(),
            found: y.len(),
        });
    }
    let projector = PlanarProjector::utm_with_hemisphere(
        zone,
        Hemisphere::from_northern(northern),
        units,
        ellipsoid,
        datum,
    )?;
    Ok(projector.unproject_slices(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn projector_km() -> PlanarProjector {
        PlanarProjector::utm(33, "km", "WGS84", "WGS84").unwrap()
    }

    #[test]
    fn test_project_in_kilometers() {
        let p = projector_km().project_point(13.271772, 38.836032);
        assert_abs_diff_eq!(p.x, 350.0, epsilon = 1e-4);
        assert_abs_diff_eq!(p.y, 4300.0, epsilon = 1e-4);
        assert_eq!(p.crs.units, LengthUnit::Kilometers);
    }

    #[test]
    fn test_units_scale_consistently() {
        let km = projector_km();
        let m = PlanarProjector::utm(33, "m", "WGS84", "WGS84").unwrap();
        let a = km.project_point(13.0, 42.0);
        let b = m.project_point(13.0, 42.0);
        assert_abs_diff_eq!(a.x * 1000.0, b.x, epsilon = 1e-6);
        assert_abs_diff_eq!(a.y * 1000.0, b.y, epsilon = 1e-6);
    }

    #[test]
    fn test_batch_matches_scalar() {
        let projector = projector_km();
        let lon = [13.0, 13.5, 14.25];
        let lat = [42.0, 42.5, 41.75];
        let batch = projector.project(&lon, &lat).unwrap();
        assert_eq!(batch.len(), 3);
        for i in 0..3 {
            let single = projector.project_point(lon[i], lat[i]);
            assert_eq!(batch.get(i), Some(single));
        }
    }

    #[test]
    fn test_invalid_parameters() {
        for (zone, units, ellps, datum) in [
            (0, "km", "WGS84", "WGS84"),
            (61, "km", "WGS84", "WGS84"),
            (33, "ft", "WGS84", "WGS84"),
            (33, "km", "airy", "WGS84"),
            (33, "km", "WGS84", "NAD27"),
        ] {
            assert!(matches!(
                project(&[13.0], &[42.0], zone, units, ellps, datum),
                Err(GeoError::InvalidProjectionParameters(_))
            ));
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        assert_eq!(
            projector_km().project(&[13.0, 14.0], &[42.0]),
            Err(GeoError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            unproject(&[350.0], &[], 33, true, "km", "WGS84", "WGS84"),
            Err(GeoError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let points = projector_km().project(&[], &[]).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_unproject_rejects_foreign_crs() {
        let p = projector_km().project_point(13.0, 42.0);
        let other = PlanarProjector::utm(32, "km", "WGS84", "WGS84").unwrap();
        assert!(matches!(
            other.unproject_point(&p),
            Err(GeoError::CrsMismatch { .. })
        ));
    }

    #[test]
    fn test_southern_roundtrip_through_free_functions() {
        let points = project(&[17.5], &[-33.0], 33, "km", "WGS84", "WGS84").unwrap();
        let y_south = points.y[0] + 10_000.0;
        let (lon, lat) =
            unproject(&points.x, &[y_south], 33, false, "km", "WGS84", "WGS84").unwrap();
        assert_abs_diff_eq!(lon[0], 17.5, epsilon = 1e-6);
        assert_abs_diff_eq!(lat[0], -33.0, epsilon = 1e-6);
    }

    #[test]
    fn test_crs_display() {
        let crs = projector_km().crs();
        assert_eq!(crs.to_string(), "UTM 33N [km] (WGS84/WGS84)");
    }

    proptest! {
        #[test]
        fn proptest_project_unproject_roundtrip(
            lon in 12.0f64..18.0,
            lat in 0.0f64..80.0,
        ) {
            let (x, y) = {
                let p = project(&[lon], &[lat], 33, "km", "WGS84", "WGS84").unwrap();
                (p.x, p.y)
            };
            let (lon2, lat2) = unproject(&x, &y, 33, true, "km", "WGS84", "WGS84").unwrap();
            prop_assert!((lon2[0] - lon).abs() < 1e-6);
            prop_assert!((lat2[0] - lat).abs() < 1e-6);
        }
    }
}
