//! Reference ellipsoids and the datums pinned to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Reference ellipsoid describing the shape of the Earth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ellipsoid {
    /// World Geodetic System 1984.
    #[default]
    #[serde(rename = "WGS84")]
    Wgs84,
    /// Geodetic Reference System 1980.
    #[serde(rename = "GRS80")]
    Grs80,
    /// International (Hayford) 1924.
    #[serde(rename = "intl")]
    International1924,
    /// Clarke 1866.
    #[serde(rename = "clrk66")]
    Clarke1866,
    /// Bessel 1841.
    #[serde(rename = "bessel")]
    Bessel1841,
}

impl Ellipsoid {
    /// Semi-major axis in meters.
    pub fn semi_major_axis(&self) -> f64 {
        match self {
            Ellipsoid::Wgs84 | Ellipsoid::Grs80 => 6_378_137.0,
            Ellipsoid::International1924 => 6_378_388.0,
            Ellipsoid::Clarke1866 => 6_378_206.4,
            Ellipsoid::Bessel1841 => 6_377_397.155,
        }
    }

    /// Inverse flattening `1/f`.
    pub fn inverse_flattening(&self) -> f64 {
        match self {
            Ellipsoid::Wgs84 => 298.257_223_563,
            Ellipsoid::Grs80 => 298.257_222_101,
            Ellipsoid::International1924 => 297.0,
            Ellipsoid::Clarke1866 => 294.978_698_214,
            Ellipsoid::Bessel1841 => 299.152_812_8,
        }
    }

    /// Flattening `f`.
    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening()
    }

    /// Third flattening `n = f / (2 - f)`.
    pub fn third_flattening(&self) -> f64 {
        let f = self.flattening();
        f / (2.0 - f)
    }

    /// First eccentricity `e`.
    pub fn eccentricity(&self) -> f64 {
        let f = self.flattening();
        (f * (2.0 - f)).sqrt()
    }

    /// Token used in configuration files.
    pub fn token(&self) -> &'static str {
        match self {
            Ellipsoid::Wgs84 => "WGS84",
            Ellipsoid::Grs80 => "GRS80",
            Ellipsoid::International1924 => "intl",
            Ellipsoid::Clarke1866 => "clrk66",
            Ellipsoid::Bessel1841 => "bessel",
        }
    }
}

impl FromStr for Ellipsoid {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wgs84" => Ok(Ellipsoid::Wgs84),
            "grs80" => Ok(Ellipsoid::Grs80),
            "intl" => Ok(Ellipsoid::International1924),
            "clrk66" => Ok(Ellipsoid::Clarke1866),
            "bessel" => Ok(Ellipsoid::Bessel1841),
            _ => Err(GeoError::InvalidProjectionParameters(format!(
                "unsupported ellipsoid {s:?}"
            ))),
        }
    }
}

impl fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Geodetic datum. No datum shifts are applied; each datum only pins the
/// ellipsoid its coordinates are expressed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Datum {
    /// World Geodetic System 1984.
    #[default]
    #[serde(rename = "WGS84")]
    Wgs84,
    /// North American Datum 1983.
    #[serde(rename = "NAD83")]
    Nad83,
    /// European Terrestrial Reference System 1989.
    #[serde(rename = "ETRS89")]
    Etrs89,
    /// North American Datum 1927.
    #[serde(rename = "NAD27")]
    Nad27,
    /// Potsdam (DHDN).
    #[serde(rename = "potsdam")]
    Potsdam,
}

impl Datum {
    /// The ellipsoid this datum is defined on.
    pub fn ellipsoid(&self) -> Ellipsoid {
        match self {
            Datum::Wgs84 => Ellipsoid::Wgs84,
            Datum::Nad83 | Datum::Etrs89 => Ellipsoid::Grs80,
            Datum::Nad27 => Ellipsoid::Clarke1866,
            Datum::Potsdam => Ellipsoid::Bessel1841,
        }
    }

    /// Check that `ellipsoid` is the one this datum is defined on.
    pub fn check_ellipsoid(&self, ellipsoid: Ellipsoid) -> Result<(), GeoError> {
        if self.ellipsoid() == ellipsoid {
            Ok(())
        } else {
            Err(GeoError::InvalidProjectionParameters(format!(
                "datum {self} is defined on ellipsoid {}, not {ellipsoid}",
                self.ellipsoid()
            )))
        }
    }

    /// Token used in configuration files.
    pub fn token(&self) -> &'static str {
        match self {
            Datum::Wgs84 => "WGS84",
            Datum::Nad83 => "NAD83",
            Datum::Etrs89 => "ETRS89",
            Datum::Nad27 => "NAD27",
            Datum::Potsdam => "potsdam",
        }
    }
}

impl FromStr for Datum {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wgs84" => Ok(Datum::Wgs84),
            "nad83" => Ok(Datum::Nad83),
            "etrs89" => Ok(Datum::Etrs89),
            "nad27" => Ok(Datum::Nad27),
            "potsdam" => Ok(Datum::Potsdam),
            _ => Err(GeoError::InvalidProjectionParameters(format!(
                "unsupported datum {s:?}"
            ))),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_constants() {
        let e = Ellipsoid::Wgs84;
        assert_relative_eq!(e.flattening(), 1.0 / 298.257_223_563);
        assert_relative_eq!(e.eccentricity(), 0.081_819_190_842_6, epsilon = 1e-12);
        assert_relative_eq!(e.third_flattening(), 0.001_679_220_386_4, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("WGS84".parse::<Ellipsoid>().unwrap(), Ellipsoid::Wgs84);
        assert_eq!("clrk66".parse::<Ellipsoid>().unwrap(), Ellipsoid::Clarke1866);
        assert_eq!("etrs89".parse::<Datum>().unwrap(), Datum::Etrs89);
        assert!("airy".parse::<Ellipsoid>().is_err());
        assert!("ED50".parse::<Datum>().is_err());
    }

    #[test]
    fn test_datum_pins_ellipsoid() {
        assert!(Datum::Wgs84.check_ellipsoid(Ellipsoid::Wgs84).is_ok());
        assert!(Datum::Nad83.check_ellipsoid(Ellipsoid::Grs80).is_ok());
        assert!(matches!(
            Datum::Wgs84.check_ellipsoid(Ellipsoid::Bessel1841),
            Err(GeoError::InvalidProjectionParameters(_))
        ));
    }
}
