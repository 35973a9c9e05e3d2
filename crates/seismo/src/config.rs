//! TOML-backed settings for cross sections and selections.

use std::fs;
use std::path::Path;

use seismo_geo::{GeoError, PlanarCrs, PlanarProjector};
use seismo_math::Point2;
use seismo_section::{DepthRange, SectionError, SliceFilter};
use seismo_select::{Shape, ShapeDescriptor, ShapeSize};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

fn from_toml<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(toml::from_str(text)?)
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let settings = from_toml(&fs::read_to_string(path)?)?;
    log::debug!("read settings from {}", path.display());
    Ok(settings)
}

/// UTM projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// UTM zone, 1 to 60.
    pub zone: i64,
    /// `"m"` or `"km"`.
    pub units: String,
    /// Ellipsoid token.
    pub ellipsoid: String,
    /// Datum token.
    pub datum: String,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            zone: 31,
            units: "km".into(),
            ellipsoid: "WGS84".into(),
            datum: "WGS84".into(),
        }
    }
}

impl ProjectionSettings {
    /// Parsed reference system.
    pub fn crs(&self) -> Result<PlanarCrs> {
        let zone = u8::try_from(self.zone).map_err(|_| {
            GeoError::InvalidProjectionParameters(format!(
                "UTM zone {} is outside 1..=60",
                self.zone
            ))
        })?;
        Ok(PlanarCrs::parse(
            zone,
            Default::default(),
            &self.units,
            &self.ellipsoid,
            &self.datum,
        )?)
    }

    /// Projector for these parameters.
    pub fn projector(&self) -> Result<PlanarProjector> {
        Ok(PlanarProjector::from_crs(self.crs()?))
    }
}

/// Parameters of a family of parallel cross sections.
///
/// ```toml
/// center = [13.11, 42.83]
/// strike = 155.0
/// num_sections = [2, 2]
/// spacing = 1.0
/// max_distance = 0.5
/// half_length = 15.0
/// depth_range = [0.0, 20.0]
///
/// [projection]
/// zone = 33
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSettings {
    /// Family center [lon, lat] in degrees.
    pub center: [f64; 2],
    /// Strike in degrees clockwise from north.
    pub strike: f64,
    /// Sections on each side of the central one: [left, right].
    pub num_sections: [usize; 2],
    /// Distance between neighboring sections.
    pub spacing: f64,
    /// Maximum distance of an event from its section plane.
    pub max_distance: f64,
    /// Half length of each section along its trace.
    pub half_length: f64,
    /// Depth window [min, max], positive down.
    pub depth_range: [f64; 2],
    /// Projection used for events and center.
    pub projection: ProjectionSettings,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            strike: 0.0,
            num_sections: [0, 0],
            spacing: 1.0,
            max_distance: 1.0,
            half_length: 50.0,
            depth_range: [0.0, 50.0],
            projection: ProjectionSettings::default(),
        }
    }
}

impl SectionSettings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        from_toml(text)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_toml(path.as_ref())
    }

    /// Slice filter described by these settings.
    pub fn filter(&self) -> Result<SliceFilter> {
        let filter = SliceFilter {
            max_distance: self.max_distance,
            depth_range: DepthRange::new(self.depth_range[0], self.depth_range[1])?,
            half_length: self.half_length,
        };
        filter.validate()?;
        Ok(filter)
    }

    /// Check every parameter without touching any data.
    pub fn validate(&self) -> Result<()> {
        self.projection.crs()?;
        self.filter()?;
        if !self.strike.is_finite() {
            return Err(SectionError::InvalidStrike(self.strike).into());
        }
        if !(self.spacing > 0.0) || !self.spacing.is_finite() {
            return Err(SectionError::InvalidSpacing(self.spacing).into());
        }
        Ok(())
    }
}

/// A shape placed on the map around a geographic center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSelection {
    /// Shape center [lon, lat] in degrees.
    pub center: [f64; 2],
    /// Shape kind: `circle`, `oval` or `rectangle` (`square`).
    pub shape: String,
    /// Radius, or a pair of extents.
    pub size: ShapeSize,
    /// Counter-clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Projection used for events and center; sizes are in its units.
    #[serde(default)]
    pub projection: ProjectionSettings,
}

impl MapSelection {
    /// Parse a selection from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        from_toml(text)
    }

    /// Read a selection from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_toml(path.as_ref())
    }

    /// Place the shape on the planar frame of `projector`.
    pub fn descriptor(&self, projector: &PlanarProjector) -> Result<ShapeDescriptor> {
        let center = projector.project_point(self.center[0], self.center[1]);
        Ok(ShapeDescriptor::new(
            Shape::from_kind(self.shape.parse()?, self.size)?,
            center.to_point(),
            self.rotation,
        )?)
    }

    /// Check projection and shape parameters.
    pub fn validate(&self) -> Result<()> {
        self.descriptor(&self.projection.projector()?).map(|_| ())
    }
}

/// A shape placed on a section, centered at `[on_section, depth]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSelection {
    /// Shape center [on_section, depth].
    pub center: [f64; 2],
    /// Shape kind: `circle`, `oval` or `rectangle` (`square`).
    pub shape: String,
    /// Radius, or a pair of extents.
    pub size: ShapeSize,
    /// Counter-clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
}

impl SectionSelection {
    /// Parse a selection from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        from_toml(text)
    }

    /// Read a selection from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_toml(path.as_ref())
    }

    /// The placed shape.
    pub fn descriptor(&self) -> Result<ShapeDescriptor> {
        Ok(ShapeDescriptor::new(
            Shape::from_kind(self.shape.parse()?, self.size)?,
            Point2::new(self.center[0], self.center[1]),
            self.rotation,
        )?)
    }

    /// Check shape parameters.
    pub fn validate(&self) -> Result<()> {
        self.descriptor().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use seismo_select::{SelectError, ShapeKind};

    #[test]
    fn test_section_settings_from_toml() {
        let settings = SectionSettings::from_toml_str(
            r#"
            center = [13.11, 42.83]
            strike = 155.0
            num_sections = [2, 1]
            max_distance = 0.5
            depth_range = [0.0, 20.0]

            [projection]
            zone = 33
            "#,
        )
        .unwrap();

        assert_eq!(settings.num_sections, [2, 1]);
        assert_eq!(settings.spacing, 1.0);
        assert_eq!(settings.half_length, 50.0);
        assert_eq!(settings.projection.zone, 33);
        assert_eq!(settings.projection.units, "km");
        settings.validate().unwrap();
    }

    #[test]
    fn test_section_settings_validation() {
        let reversed = SectionSettings {
            depth_range: [10.0, 0.0],
            ..Default::default()
        };
        assert!(matches!(
            reversed.validate(),
            Err(Error::Section(SectionError::InvalidDepthRange { .. }))
        ));

        let no_spacing = SectionSettings {
            spacing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            no_spacing.validate(),
            Err(Error::Section(SectionError::InvalidSpacing(_)))
        ));

        let mut bad_zone = SectionSettings::default();
        bad_zone.projection.zone = 61;
        assert!(matches!(bad_zone.validate(), Err(Error::Geo(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            SectionSettings::from_toml_str("strike = \"north\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_map_selection_from_toml() {
        let selection = MapSelection::from_toml_str(
            r#"
            center = [13.1, 42.8]
            shape = "rectangle"
            size = [4.0, 2.0]
            rotation = 30.0

            [projection]
            zone = 33
            units = "m"
            "#,
        )
        .unwrap();
        assert_eq!(selection.shape, "rectangle");
        assert_eq!(selection.size, ShapeSize::SemiAxes(4.0, 2.0));
        selection.validate().unwrap();
    }

    #[test]
    fn test_section_selection_from_toml() {
        let selection = SectionSelection::from_toml_str(
            r#"
            center = [0.0, 8.0]
            shape = "circle"
            size = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(selection.size, ShapeSize::Radius(2.5));
        assert_eq!(selection.rotation, 0.0);
        let descriptor = selection.descriptor().unwrap();
        assert_eq!(descriptor.center, [0.0, 8.0]);
    }

    #[test]
    fn test_selection_shape_errors() {
        let triangle =
            SectionSelection::from_toml_str("center = [0.0, 0.0]\nshape = \"triangle\"\nsize = 1.0")
                .unwrap();
        assert!(matches!(
            triangle.validate(),
            Err(Error::Select(SelectError::UnsupportedShapeKind(_)))
        ));
        let oval_with_radius = SectionSelection {
            center: [0.0, 0.0],
            shape: "oval".into(),
            size: ShapeSize::Radius(1.0),
            rotation: 0.0,
        };
        assert!(matches!(oval_with_radius.validate(), Err(Error::Select(_))));
    }

    #[test]
    fn test_shape_tokens_are_case_insensitive() {
        let selection =
            SectionSelection::from_toml_str("center = [0.0, 0.0]\nshape = \"Square\"\nsize = [2.0, 2.0]")
                .unwrap();
        let descriptor = selection.descriptor().unwrap();
        assert_eq!(descriptor.shape.kind(), ShapeKind::Rectangle);
    }

    #[test]
    fn test_out_of_range_zone_is_a_projection_error() {
        for zone in ["-1", "0", "61", "300"] {
            let settings =
                SectionSettings::from_toml_str(&format!("[projection]\nzone = {zone}")).unwrap();
            assert!(
                matches!(
                    settings.validate(),
                    Err(Error::Geo(GeoError::InvalidProjectionParameters(_)))
                ),
                "zone {zone}"
            );
        }
    }
}
