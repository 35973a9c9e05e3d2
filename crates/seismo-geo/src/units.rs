//! Length units for planar coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Unit of planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Meters (`"m"`).
    #[serde(rename = "m")]
    Meters,
    /// Kilometers (`"km"`).
    #[default]
    #[serde(rename = "km")]
    Kilometers,
}

impl LengthUnit {
    /// Number of meters in one unit.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Kilometers => 1000.0,
        }
    }

    /// Convert a length in meters into this unit.
    pub fn scale_from_meters(&self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    /// Convert a length in this unit into meters.
    pub fn scale_to_meters(&self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Short token used in configuration files.
    pub fn token(&self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Kilometers => "km",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "m" => Ok(LengthUnit::Meters),
            "km" => Ok(LengthUnit::Kilometers),
            other => Err(GeoError::InvalidProjectionParameters(format!(
                "unsupported unit {other:?} (expected \"m\" or \"km\")"
            ))),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
