#![warn(missing_docs)]

//! Math types for seismic cross-section geometry.
//!
//! Thin wrappers around nalgebra providing the types shared by the
//! projection, slicing and selection crates: points, vectors, a 2D
//! affine transform and compass-bearing helpers.

use nalgebra::{Matrix3, Vector2, Vector3};

/// A point in 3D space (planar x, planar y, elevation).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in a 2D plane (map plane or section plane).
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// A 3x3 homogeneous matrix acting on 2D points.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2 {
    /// The underlying 3x3 matrix.
    pub matrix: Matrix3<f64>,
}

impl Transform2 {
    /// Translation by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 2)] = dx;
        m[(1, 2)] = dy;
        Self { matrix: m }
    }

    /// Counter-clockwise rotation about the origin by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix3::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Counter-clockwise rotation about `center` by `angle` radians.
    ///
    /// Equivalent to
    /// `x' = cx + cos(a)(px - cx) - sin(a)(py - cy)` and
    /// `y' = cy + sin(a)(px - cx) + cos(a)(py - cy)`.
    pub fn rotation_about(center: &Point2, angle: f64) -> Self {
        Self::translation(center.x, center.y)
            .then(&Self::rotation(angle))
            .then(&Self::translation(-center.x, -center.y))
    }

    /// Counter-clockwise rotation about `center` by `degrees`.
    pub fn rotation_about_degrees(center: &Point2, degrees: f64) -> Self {
        Self::rotation_about(center, degrees.to_radians())
    }

    /// Compose: `self` then `other` (self * other), so `other` applies first.
    pub fn then(&self, other: &Transform2) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        let m = &self.matrix;
        Point2::new(
            m[(0, 0)] * p.x + m[(0, 1)] * p.y + m[(0, 2)],
            m[(1, 0)] * p.x + m[(1, 1)] * p.y + m[(1, 2)],
        )
    }

    /// Transform a vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec2) -> Vec2 {
        let m = &self.matrix;
        Vec2::new(
            m[(0, 0)] * v.x + m[(0, 1)] * v.y,
            m[(1, 0)] * v.x + m[(1, 1)] * v.y,
        )
    }
}

/// Unit vector in the planar (east, north) frame pointing along a compass
/// bearing given in degrees clockwise from north.
pub fn bearing_to_vector(bearing_degrees: f64) -> Vec2 {
    let angle = std::f64::consts::FRAC_PI_2 - bearing_degrees.to_radians();
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_translation() {
        let t = Transform2::translation(10.0, 20.0);
        let p = t.apply_point(&Point2::new(1.0, 2.0));
        assert_abs_diff_eq!(p.x, 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 22.0, epsilon = 1e-12);
    }

    #[test]
    fn test_translation_ignored_for_vectors() {
        let t = Transform2::translation(10.0, 20.0);
        let v = t.apply_vec(&Vec2::new(1.0, 0.0));
        assert_abs_diff_eq!(v.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_90() {
        let t = Transform2::rotation(PI / 2.0);
        let p = t.apply_point(&Point2::new(1.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_about_center() {
        // (3,2) is one unit east of (2,2); a quarter turn puts it one unit north.
        let center = Point2::new(2.0, 2.0);
        let t = Transform2::rotation_about_degrees(&center, 90.0);
        let p = t.apply_point(&Point2::new(3.0, 2.0));
        assert_abs_diff_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 3.0, epsilon = 1e-12);

        // Center is a fixed point.
        let c = t.apply_point(&center);
        assert_abs_diff_eq!(c.x, center.x, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, center.y, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_about_matches_closed_form() {
        let center = Point2::new(-1.5, 4.0);
        let angle = 0.7_f64;
        let p = Point2::new(3.25, -2.0);
        let t = Transform2::rotation_about(&center, angle);
        let r = t.apply_point(&p);
        let qx = center.x + angle.cos() * (p.x - center.x) - angle.sin() * (p.y - center.y);
        let qy = center.y + angle.sin() * (p.x - center.x) + angle.cos() * (p.y - center.y);
        assert_abs_diff_eq!(r.x, qx, epsilon = 1e-12);
        assert_abs_diff_eq!(r.y, qy, epsilon = 1e-12);
    }

    #[test]
    fn test_bearing_to_vector() {
        let north = bearing_to_vector(0.0);
        assert_abs_diff_eq!(north.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(north.y, 1.0, epsilon = 1e-12);

        let east = bearing_to_vector(90.0);
        assert_abs_diff_eq!(east.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(east.y, 0.0, epsilon = 1e-12);

        let south_west = bearing_to_vector(225.0);
        assert_abs_diff_eq!(south_west.x, -(0.5_f64.sqrt()), epsilon = 1e-12);
        assert_abs_diff_eq!(south_west.y, -(0.5_f64.sqrt()), epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn proptest_rotation_roundtrip(
            px in -1e3f64..1e3,
            py in -1e3f64..1e3,
            cx in -1e3f64..1e3,
            cy in -1e3f64..1e3,
            degrees in -720f64..720.0,
        ) {
            let center = Point2::new(cx, cy);
            let p = Point2::new(px, py);
            let forward = Transform2::rotation_about_degrees(&center, degrees);
            let backward = Transform2::rotation_about_degrees(&center, -degrees);
            let back = backward.apply_point(&forward.apply_point(&p));
            prop_assert!((back - p).norm() < 1e-9);
        }
    }
}
