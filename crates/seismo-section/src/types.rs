//! Core types for cross sections.

use seismo_geo::{PlanarCrs, PlanarPoints};
use seismo_math::{Point3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};

/// A vertical cutting plane in a family of parallel sections.
///
/// Stored as arrays so the frame serializes without nalgebra's serde
/// feature. The normal is horizontal and of unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionFrame {
    /// Position in the family, 0 = leftmost.
    pub index: usize,
    /// Signed offset of the origin from the family center, along strike.
    pub offset: f64,
    /// Point on the plane [x, y, elevation].
    pub origin: [f64; 3],
    /// Plane normal [x, y, 0].
    pub normal: [f64; 3],
    /// Strike of the structure in degrees clockwise from north.
    pub strike: f64,
    /// Reference system of `origin`.
    pub crs: PlanarCrs,
}

impl SectionFrame {
    /// Get origin as Point3.
    pub fn origin_point(&self) -> Point3 {
        Point3::new(self.origin[0], self.origin[1], self.origin[2])
    }

    /// Get normal as Vec3.
    pub fn normal_vec(&self) -> Vec3 {
        Vec3::new(self.normal[0], self.normal[1], self.normal[2])
    }

    /// Horizontal in-plane axis along which on-section coordinates grow.
    pub fn trace_axis(&self) -> Vec2 {
        Vec2::new(-self.normal[1], self.normal[0])
    }
}

/// Inclusive depth interval, positive down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    /// Shallowest depth kept.
    pub min: f64,
    /// Deepest depth kept.
    pub max: f64,
}

impl DepthRange {
    /// Create a depth range, rejecting reversed or non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Validate bounds.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(SectionError::InvalidDepthRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Whether `depth` lies in the range (bounds included).
    pub fn contains(&self, depth: f64) -> bool {
        self.min <= depth && depth <= self.max
    }
}

/// Inclusion criteria applied to every event of a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceFilter {
    /// Events must be strictly closer than this to the plane.
    pub max_distance: f64,
    /// Events must lie within this depth range.
    pub depth_range: DepthRange,
    /// Events must be strictly closer than this to the origin along the trace.
    pub half_length: f64,
}

impl SliceFilter {
    /// Validate filter settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_distance > 0.0) || !self.max_distance.is_finite() {
            return Err(SectionError::InvalidFilter(format!(
                "max_distance must be positive, got {}",
                self.max_distance
            )));
        }
        if !(self.half_length > 0.0) || !self.half_length.is_finite() {
            return Err(SectionError::InvalidFilter(format!(
                "half_length must be positive, got {}",
                self.half_length
            )));
        }
        self.depth_range.validate()
    }
}

/// An event retained by a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPoint {
    /// Row of the event in the source table.
    pub row: usize,
    /// Perpendicular distance to the section plane.
    pub distance: f64,
    /// Depth, positive down.
    pub depth: f64,
    /// Signed position along the section trace, relative to the origin.
    pub on_section: f64,
}

/// The events of one section, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSlice {
    /// The cutting plane.
    pub frame: SectionFrame,
    /// Retained events.
    pub points: Vec<SectionPoint>,
}

impl SectionSlice {
    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no event was retained.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Source rows of the retained events.
    pub fn rows(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.row).collect()
    }

    /// On-section coordinates of the retained events.
    pub fn on_section_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.on_section).collect()
    }

    /// Depths of the retained events.
    pub fn depths(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.depth).collect()
    }
}

/// Planar event positions paired with their depths.
#[derive(Debug, Clone, Copy)]
pub struct EventCloud<'a> {
    planar: &'a PlanarPoints,
    depth: &'a [f64],
}

impl<'a> EventCloud<'a> {
    /// Pair planar points with depths (positive down).
    pub fn new(planar: &'a PlanarPoints, depth: &'a [f64]) -> Result<Self> {
        if planar.len() != depth.len() {
            return Err(SectionError::DimensionMismatch {
                expected: planar.len(),
                found: depth.len(),
            });
        }
        Ok(Self { planar, depth })
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    /// Whether the cloud is empty.
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Reference system of the planar coordinates.
    pub fn crs(&self) -> PlanarCrs {
        self.planar.crs
    }

    /// Event at `row` as [x, y, elevation], elevation being `-depth`.
    pub fn point(&self, row: usize) -> Point3 {
        Point3::new(self.planar.x[row], self.planar.y[row], -self.depth[row])
    }

    /// Depth of the event at `row`, positive down.
    pub fn depth(&self, row: usize) -> f64 {
        self.depth[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seismo_geo::PlanarProjector;

    #[test]
    fn test_depth_range() {
        let range = DepthRange::new(0.0, 10.0).unwrap();
        assert!(range.contains(0.0));
        assert!(range.contains(10.0));
        assert!(!range.contains(10.000_001));
        assert!(!range.contains(-0.5));

        assert!(matches!(
            DepthRange::new(10.0, 0.0),
            Err(SectionError::InvalidDepthRange { .. })
        ));
        assert!(DepthRange::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_filter_validation() {
        let depth_range = DepthRange::new(0.0, 20.0).unwrap();
        let ok = SliceFilter {
            max_distance: 1.0,
            depth_range,
            half_length: 15.0,
        };
        assert!(ok.validate().is_ok());
        assert!(SliceFilter {
            max_distance: 0.0,
            ..ok
        }
        .validate()
        .is_err());
        assert!(SliceFilter {
            half_length: -1.0,
            ..ok
        }
        .validate()
        .is_err());
        assert!(SliceFilter {
            max_distance: f64::NAN,
            ..ok
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_event_cloud_dimension_mismatch() {
        let crs = PlanarProjector::utm(33, "km", "WGS84", "WGS84").unwrap().crs();
        let planar = PlanarPoints::new(vec![0.0, 1.0], vec![0.0, 1.0], crs).unwrap();
        assert_eq!(
            EventCloud::new(&planar, &[5.0]).unwrap_err(),
            SectionError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
        let cloud = EventCloud::new(&planar, &[5.0, 7.0]).unwrap();
        assert_eq!(cloud.point(1), Point3::new(1.0, 1.0, -7.0));
        assert_eq!(cloud.depth(1), 7.0);
    }
}
