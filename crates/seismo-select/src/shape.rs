//! Shape definitions for point selection.

use std::fmt;
use std::str::FromStr;

use seismo_math::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectError};

/// Textual shape kind, as found in configuration files.
///
/// Tokens are case-insensitive; `square` is accepted for `rectangle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ShapeKind {
    /// Circle.
    Circle,
    /// Axis-aligned (before rotation) ellipse.
    Oval,
    /// Axis-aligned (before rotation) rectangle.
    Rectangle,
}

impl FromStr for ShapeKind {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(ShapeKind::Circle),
            "oval" => Ok(ShapeKind::Oval),
            "rectangle" | "square" => Ok(ShapeKind::Rectangle),
            _ => Err(SelectError::UnsupportedShapeKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for ShapeKind {
    type Error = SelectError;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Oval => "oval",
            ShapeKind::Rectangle => "rectangle",
        })
    }
}

/// Size as given by a caller: a scalar radius or a pair.
///
/// The pair holds semi-axes `(rx, ry)` for circles and ovals, and full
/// `(width, height)` for rectangles. Deserializes from a number or a
/// two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeSize {
    /// Single radius.
    Radius(f64),
    /// Two extents.
    SemiAxes(f64, f64),
}

/// A validated shape, centered on the origin and not rotated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Euclidean disk; boundary included.
    Circle {
        /// Radius.
        radius: f64,
    },
    /// Ellipse `(x/rx)^2 + (y/ry)^2 <= 1`.
    Oval {
        /// Semi-axis along x.
        rx: f64,
        /// Semi-axis along y.
        ry: f64,
    },
    /// Rectangle with full side lengths; boundary included.
    Rectangle {
        /// Extent along x.
        width: f64,
        /// Extent along y.
        height: f64,
    },
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SelectError::InvalidShapeSize(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

impl Shape {
    /// Circle with a scalar radius.
    pub fn circle(radius: f64) -> Result<Self> {
        check_positive("radius", radius)?;
        Ok(Shape::Circle { radius })
    }

    /// Ellipse with semi-axes `rx` and `ry`.
    pub fn oval(rx: f64, ry: f64) -> Result<Self> {
        check_positive("rx", rx)?;
        check_positive("ry", ry)?;
        Ok(Shape::Oval { rx, ry })
    }

    /// Rectangle with full side lengths.
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        check_positive("width", width)?;
        check_positive("height", height)?;
        Ok(Shape::Rectangle { width, height })
    }

    /// Build a shape from a kind and a caller-supplied size.
    ///
    /// A circle given a pair uses the oval test, which reduces to a true
    /// circle when both semi-axes are equal.
    pub fn from_kind(kind: ShapeKind, size: ShapeSize) -> Result<Self> {
        match (kind, size) {
            (ShapeKind::Circle, ShapeSize::Radius(r)) => Shape::circle(r),
            (ShapeKind::Circle | ShapeKind::Oval, ShapeSize::SemiAxes(rx, ry)) => {
                Shape::oval(rx, ry)
            }
            (ShapeKind::Rectangle, ShapeSize::SemiAxes(w, h)) => Shape::rectangle(w, h),
            (kind, ShapeSize::Radius(_)) => Err(SelectError::InvalidShapeSize(format!(
                "{kind} needs two size components, got a single radius"
            ))),
        }
    }

    /// Re-check size components, e.g. after deserialization.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Shape::Circle { radius } => check_positive("radius", radius),
            Shape::Oval { rx, ry } => {
                check_positive("rx", rx)?;
                check_positive("ry", ry)
            }
            Shape::Rectangle { width, height } => {
                check_positive("width", width)?;
                check_positive("height", height)
            }
        }
    }

    /// Kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Oval { .. } => ShapeKind::Oval,
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
        }
    }

    /// Membership of an offset `(dx, dy)` from the shape center, expressed
    /// in the shape's own (unrotated) axes.
    pub fn contains_offset(&self, dx: f64, dy: f64) -> bool {
        match *self {
            Shape::Circle { radius } => dx.hypot(dy) <= radius,
            Shape::Oval { rx, ry } => (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0,
            Shape::Rectangle { width, height } => {
                -width / 2.0 <= dx && dx <= width / 2.0 && -height / 2.0 <= dy && dy <= height / 2.0
            }
        }
    }
}

/// A shape placed in a 2D frame: center plus counter-clockwise rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    /// The shape.
    pub shape: Shape,
    /// Center [x, y].
    pub center: [f64; 2],
    /// Rotation in degrees, counter-clockwise.
    #[serde(default)]
    pub rotation: f64,
}

impl ShapeDescriptor {
    /// Place a shape.
    pub fn new(shape: Shape, center: Point2, rotation_degrees: f64) -> Result<Self> {
        let descriptor = Self {
            shape,
            center: [center.x, center.y],
            rotation: rotation_degrees,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Place a shape described by a textual kind and a size.
    pub fn parse(kind: &str, size: ShapeSize, center: Point2, rotation_degrees: f64) -> Result<Self> {
        let shape = Shape::from_kind(kind.parse()?, size)?;
        Self::new(shape, center, rotation_degrees)
    }

    /// Validate size and rotation.
    pub fn validate(&self) -> Result<()> {
        if !self.rotation.is_finite() {
            return Err(SelectError::InvalidRotation(self.rotation));
        }
        self.shape.validate()
    }

    /// Center as a nalgebra point.
    pub fn center_point(&self) -> Point2 {
        Point2::new(self.center[0], self.center[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("circle".parse::<ShapeKind>().unwrap(), ShapeKind::Circle);
        assert_eq!("Oval".parse::<ShapeKind>().unwrap(), ShapeKind::Oval);
        assert_eq!("rectangle".parse::<ShapeKind>().unwrap(), ShapeKind::Rectangle);
        assert_eq!("square".parse::<ShapeKind>().unwrap(), ShapeKind::Rectangle);
        assert_eq!(
            "triangle".parse::<ShapeKind>(),
            Err(SelectError::UnsupportedShapeKind("triangle".into()))
        );
    }

    #[test]
    fn test_kind_serde_matches_parsing() {
        let kind: ShapeKind = serde_json::from_str(r#""Square""#).unwrap();
        assert_eq!(kind, ShapeKind::Rectangle);
        assert_eq!(serde_json::to_string(&kind).unwrap(), r#""rectangle""#);
        let err = serde_json::from_str::<ShapeKind>(r#""triangle""#).unwrap_err();
        assert!(err.to_string().contains("unsupported shape kind"));
    }

    #[test]
    fn test_from_kind() {
        assert_eq!(
            Shape::from_kind(ShapeKind::Circle, ShapeSize::Radius(3.0)).unwrap(),
            Shape::Circle { radius: 3.0 }
        );
        assert_eq!(
            Shape::from_kind(ShapeKind::Circle, ShapeSize::SemiAxes(3.0, 3.0)).unwrap(),
            Shape::Oval { rx: 3.0, ry: 3.0 }
        );
        assert_eq!(
            Shape::from_kind(ShapeKind::Rectangle, ShapeSize::SemiAxes(4.0, 2.0)).unwrap(),
            Shape::Rectangle {
                width: 4.0,
                height: 2.0
            }
        );
        assert!(matches!(
            Shape::from_kind(ShapeKind::Oval, ShapeSize::Radius(2.0)),
            Err(SelectError::InvalidShapeSize(_))
        ));
        assert!(matches!(
            Shape::from_kind(ShapeKind::Rectangle, ShapeSize::Radius(2.0)),
            Err(SelectError::InvalidShapeSize(_))
        ));
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(Shape::circle(0.0).is_err());
        assert!(Shape::circle(-1.0).is_err());
        assert!(Shape::oval(1.0, 0.0).is_err());
        assert!(Shape::rectangle(f64::INFINITY, 1.0).is_err());
        assert!(Shape::rectangle(1.0, f64::NAN).is_err());
        assert!(Shape::Circle { radius: -2.0 }.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let shape = Shape::circle(1.0).unwrap();
        assert_eq!(
            ShapeDescriptor::new(shape, Point2::origin(), f64::NAN)
                .unwrap_err()
                .to_string(),
            "shape rotation must be finite, got NaN"
        );
    }

    #[test]
    fn test_size_deserializes_from_number_or_pair() {
        let r: ShapeSize = serde_json::from_str("2.5").unwrap();
        assert_eq!(r, ShapeSize::Radius(2.5));
        let pair: ShapeSize = serde_json::from_str("[3, 1.5]").unwrap();
        assert_eq!(pair, ShapeSize::SemiAxes(3.0, 1.5));
    }

    #[test]
    fn test_descriptor_serialization() {
        let d = ShapeDescriptor::parse("oval", ShapeSize::SemiAxes(2.0, 1.0), Point2::new(1.0, 2.0), 30.0)
            .unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(
            json,
            r#"{"shape":{"kind":"oval","rx":2.0,"ry":1.0},"center":[1.0,2.0],"rotation":30.0}"#
        );
        let back: ShapeDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
