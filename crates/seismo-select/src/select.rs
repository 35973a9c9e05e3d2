//! Point-in-shape selection under rotation.

use rayon::prelude::*;
use seismo_math::{Point2, Transform2};

use crate::error::{Result, SelectError};
use crate::shape::ShapeDescriptor;

/// Rotate `point` counter-clockwise about `center` by `degrees`.
pub fn rotate_about(point: &Point2, center: &Point2, degrees: f64) -> Point2 {
    Transform2::rotation_about_degrees(center, degrees).apply_point(point)
}

/// Tests points against one placed shape.
///
/// Instead of rotating the shape, each query point is rotated about the
/// shape center by the inverse rotation; the inverse is computed once.
#[derive(Debug, Clone)]
pub struct ShapeSelector {
    descriptor: ShapeDescriptor,
    center: Point2,
    unrotate: Transform2,
}

impl ShapeSelector {
    /// Validate `descriptor` and prepare the inverse rotation.
    pub fn new(descriptor: ShapeDescriptor) -> Result<Self> {
        descriptor.validate()?;
        Ok(Self {
            center: descriptor.center_point(),
            unrotate: Transform2::rotation((-descriptor.rotation).to_radians()),
            descriptor,
        })
    }

    /// The placed shape.
    pub fn descriptor(&self) -> &ShapeDescriptor {
        &self.descriptor
    }

    /// Whether `point` lies inside the shape (boundary included).
    pub fn contains(&self, point: &Point2) -> bool {
        let local = self.unrotate.apply_vec(&(*point - self.center));
        self.descriptor.shape.contains_offset(local.x, local.y)
    }

    /// Indices of the points inside the shape, in input order.
    pub fn select_points(&self, points: &[Point2]) -> Vec<usize> {
        let selected: Vec<usize> = points
            .par_iter()
            .enumerate()
            .filter(|&(_, p)| self.contains(p))
            .map(|(i, _)| i)
            .collect();
        self.log_selection(selected.len(), points.len());
        selected
    }

    /// Indices of the points `(xs[i], ys[i])` inside the shape, in input order.
    pub fn select(&self, xs: &[f64], ys: &[f64]) -> Result<Vec<usize>> {
        if xs.len() != ys.len() {
            return Err(SelectError::DimensionMismatch {
                expected: xs.len(),
                found: ys.len(),
            });
        }
        let selected: Vec<usize> = xs
            .par_iter()
            .zip(ys.par_iter())
            .enumerate()
            .filter(|&(_, (&x, &y))| self.contains(&Point2::new(x, y)))
            .map(|(i, _)| i)
            .collect();
        self.log_selection(selected.len(), xs.len());
        Ok(selected)
    }

    fn log_selection(&self, selected: usize, total: usize) {
        log::debug!(
            "{} at ({}, {}) rotated {} deg selected {selected} of {total} points",
            self.descriptor.shape.kind(),
            self.center.x,
            self.center.y,
            self.descriptor.rotation
        );
    }
}

/// Indices of the points `(xs[i], ys[i])` inside `descriptor`, in input order.
pub fn select(xs: &[f64], ys: &[f64], descriptor: &ShapeDescriptor) -> Result<Vec<usize>> {
    ShapeSelector::new(*descriptor)?.select(xs, ys)
}

/// Indices of `points` inside `descriptor`, in input order.
pub fn select_points(points: &[Point2], descriptor: &ShapeDescriptor) -> Result<Vec<usize>> {
    Ok(ShapeSelector::new(*descriptor)?.select_points(points))
}
