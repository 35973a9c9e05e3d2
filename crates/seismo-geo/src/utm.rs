//! Transverse Mercator projection and UTM zone definitions.
//!
//! The forward and inverse mappings use the Krüger series to third order
//! in the third flattening, which keeps errors well below a millimeter
//! inside a UTM zone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, Result};

/// UTM central scale factor.
pub const UTM_SCALE_FACTOR: f64 = 0.9996;

/// UTM false easting in meters.
pub const UTM_FALSE_EASTING: f64 = 500_000.0;

/// UTM false northing for the southern hemisphere, in meters.
pub const UTM_SOUTH_FALSE_NORTHING: f64 = 10_000_000.0;

/// A geographic to planar mapping working in meters and degrees.
///
/// Implementations must be pure: the same input always yields the same
/// output.
pub trait Projection: Sync {
    /// Map `(lon, lat)` in degrees to `(easting, northing)` in meters.
    fn forward(&self, lon: f64, lat: f64) -> (f64, f64);

    /// Map `(easting, northing)` in meters back to `(lon, lat)` in degrees.
    fn inverse(&self, easting: f64, northing: f64) -> (f64, f64);
}

/// A UTM zone number in `1..=60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UtmZone(u8);

impl UtmZone {
    /// Validate a zone number.
    pub fn new(zone: u8) -> Result<Self> {
        if (1..=60).contains(&zone) {
            Ok(Self(zone))
        } else {
            Err(GeoError::InvalidProjectionParameters(format!(
                "UTM zone {zone} is outside 1..=60"
            )))
        }
    }

    /// Zone number.
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Longitude of the central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.0) * 6.0 - 183.0
    }
}

impl TryFrom<u8> for UtmZone {
    type Error = GeoError;

    fn try_from(zone: u8) -> Result<Self> {
        Self::new(zone)
    }
}

impl From<UtmZone> for u8 {
    fn from(zone: UtmZone) -> Self {
        zone.0
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hemisphere convention for northings.
///
/// `North` uses a false northing of zero, so southern latitudes project to
/// negative northings. `South` adds the 10 000 km southern false northing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    /// Northern hemisphere convention.
    #[default]
    North,
    /// Southern hemisphere convention.
    South,
}

impl Hemisphere {
    /// Hemisphere from an "is northern" flag.
    pub fn from_northern(northern: bool) -> Self {
        if northern {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    /// False northing in meters.
    pub fn false_northing(&self) -> f64 {
        match self {
            Hemisphere::North => 0.0,
            Hemisphere::South => UTM_SOUTH_FALSE_NORTHING,
        }
    }
}

/// Transverse Mercator projection on an ellipsoid.
#[derive(Debug, Clone, PartialEq)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    /// Central meridian in radians.
    lon0: f64,
    false_easting: f64,
    false_northing: f64,
    /// Scale factor times the rectifying radius.
    k0_a: f64,
    eccentricity: f64,
    alpha: [f64; 3],
    beta: [f64; 3],
    delta: [f64; 3],
}

impl TransverseMercator {
    /// Create a projection with the given central meridian (degrees),
    /// scale factor and false origin (meters).
    pub fn new(
        ellipsoid: Ellipsoid,
        central_meridian: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let a = ellipsoid.semi_major_axis();
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let rectifying_radius = a / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);

        Self {
            ellipsoid,
            lon0: central_meridian.to_radians(),
            false_easting,
            false_northing,
            k0_a: scale_factor * rectifying_radius,
            eccentricity: ellipsoid.eccentricity(),
            alpha: [
                n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3,
                13.0 / 48.0 * n2 - 3.0 / 5.0 * n3,
                61.0 / 240.0 * n3,
            ],
            beta: [
                n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3,
                1.0 / 48.0 * n2 + 1.0 / 15.0 * n3,
                17.0 / 480.0 * n3,
            ],
            delta: [
                2.0 * n - 2.0 / 3.0 * n2 - 2.0 * n3,
                7.0 / 3.0 * n2 - 8.0 / 5.0 * n3,
                56.0 / 15.0 * n3,
            ],
        }
    }

    /// Standard UTM projection for a zone and hemisphere convention.
    pub fn utm(zone: UtmZone, hemisphere: Hemisphere, ellipsoid: Ellipsoid) -> Self {
        Self::new(
            ellipsoid,
            zone.central_meridian(),
            UTM_SCALE_FACTOR,
            UTM_FALSE_EASTING,
            hemisphere.false_northing(),
        )
    }

    /// The ellipsoid this projection is computed on.
    pub fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let phi = lat.to_radians();
        let lambda = lon.to_radians() - self.lon0;
        let e = self.eccentricity;

        // Conformal latitude, as tan.
        let t = (phi.sin().atanh() - e * (e * phi.sin()).atanh()).sinh();
        let xi_p = t.atan2(lambda.cos());
        let eta_p = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += alpha * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        (
            self.false_easting + self.k0_a * eta,
            self.false_northing + self.k0_a * xi,
        )
    }

    fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let xi = (northing - self.false_northing) / self.k0_a;
        let eta = (easting - self.false_easting) / self.k0_a;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_p -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_p.sin() / eta_p.cosh()).asin();
        let mut phi = chi;
        for (j, delta) in self.delta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            phi += delta * (k * chi).sin();
        }
        let lambda = self.lon0 + eta_p.sinh().atan2(xi_p.cos());

        (lambda.to_degrees(), phi.to_degrees())
    }
}
