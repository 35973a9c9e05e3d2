//! Construction of parallel section frames along a strike direction.

use seismo_geo::PlanarPoint;
use seismo_math::{bearing_to_vector, Vec3};

use crate::error::{Result, SectionError};
use crate::types::SectionFrame;

/// Horizontal unit normal of sections cut across a structure with the
/// given strike (degrees clockwise from north).
///
/// The normal bearing is `strike - 90`; the y component is negated because
/// bearings run clockwise while the planar frame is counter-clockwise.
pub fn section_normal(strike_degrees: f64) -> Vec3 {
    let bearing = (strike_degrees - 90.0).to_radians();
    Vec3::new(bearing.cos(), -bearing.sin(), 0.0)
}

/// Offsets from `-num_left * spacing` to `num_right * spacing` in steps of
/// `spacing`, both ends included.
pub fn section_offsets(num_left: usize, num_right: usize, spacing: f64) -> Result<Vec<f64>> {
    if !(spacing > 0.0) || !spacing.is_finite() {
        return Err(SectionError::InvalidSpacing(spacing));
    }
    let start = -(num_left as f64) * spacing;
    Ok((0..=num_left + num_right)
        .map(|i| start + i as f64 * spacing)
        .collect())
}

/// Build `num_left + num_right + 1` parallel section frames around `center`.
///
/// Frame origins are displaced along the strike direction; every frame
/// shares the same normal. Frames are ordered by increasing offset and the
/// frame at offset 0 passes through `center`.
pub fn build_frames(
    center: &PlanarPoint,
    strike_degrees: f64,
    num_left: usize,
    num_right: usize,
    spacing: f64,
) -> Result<Vec<SectionFrame>> {
    if !strike_degrees.is_finite() {
        return Err(SectionError::InvalidStrike(strike_degrees));
    }
    let offsets = section_offsets(num_left, num_right, spacing)?;
    let normal = section_normal(strike_degrees);
    let along = bearing_to_vector(strike_degrees);

    let frames: Vec<SectionFrame> = offsets
        .into_iter()
        .enumerate()
        .map(|(index, offset)| SectionFrame {
            index,
            offset,
            origin: [
                center.x + offset * along.x,
                center.y + offset * along.y,
                0.0,
            ],
            normal: [normal.x, normal.y, normal.z],
            strike: strike_degrees,
            crs: center.crs,
        })
        .collect();

    log::debug!(
        "built {} section frames, strike {strike_degrees} deg, spacing {spacing} {}",
        frames.len(),
        center.crs.units
    );
    Ok(frames)
}
