//! Event slicing: plane distance, along-trace projection and filtering.

use rayon::prelude::*;
use seismo_math::{Point3, Vec3};

use crate::error::Result;
use crate::types::{EventCloud, SectionFrame, SectionPoint, SectionSlice, SliceFilter};

/// Constant `d` of the plane equation `n·p + d = 0` through `origin`.
pub fn plane_constant(normal: &Vec3, origin: &Point3) -> f64 {
    -normal.dot(&origin.coords)
}

/// Unsigned distance from `point` to the plane through `origin` with
/// `normal`. The normal need not be unit length.
pub fn distance_to_plane(point: &Point3, normal: &Vec3, origin: &Point3) -> f64 {
    (normal.dot(&point.coords) + plane_constant(normal, origin)).abs() / normal.norm()
}

/// Signed position of `(x, y)` along the horizontal trace of `frame`,
/// measured from the frame origin.
pub fn on_section_coordinate(x: f64, y: f64, frame: &SectionFrame) -> f64 {
    (y - frame.origin[1]) * frame.normal[0] - (x - frame.origin[0]) * frame.normal[1]
}

/// Slice the events with a single frame.
///
/// An event is kept when its distance to the plane is strictly below
/// `max_distance`, its depth is in the (inclusive) depth range and its
/// on-section coordinate is strictly within `half_length` of the origin.
/// Output keeps the source order.
pub fn slice_events(
    events: &EventCloud<'_>,
    frame: &SectionFrame,
    filter: &SliceFilter,
) -> Result<SectionSlice> {
    filter.validate()?;
    frame.crs.ensure_same(&events.crs())?;
    Ok(slice_unchecked(events, frame, filter))
}

/// Slice the events with every frame of a family, in parallel.
///
/// Output order follows `frames`.
pub fn slice_all(
    events: &EventCloud<'_>,
    frames: &[SectionFrame],
    filter: &SliceFilter,
) -> Result<Vec<SectionSlice>> {
    filter.validate()?;
    for frame in frames {
        frame.crs.ensure_same(&events.crs())?;
    }

    let slices: Vec<SectionSlice> = frames
        .par_iter()
        .map(|frame| slice_unchecked(events, frame, filter))
        .collect();

    for slice in slices.iter().filter(|s| s.is_empty()) {
        log::warn!(
            "section {} (offset {}) contains no events",
            slice.frame.index,
            slice.frame.offset
        );
    }
    log::info!(
        "sliced {} events into {} sections ({} retained in total)",
        events.len(),
        slices.len(),
        slices.iter().map(SectionSlice::len).sum::<usize>()
    );
    Ok(slices)
}

fn slice_unchecked(
    events: &EventCloud<'_>,
    frame: &SectionFrame,
    filter: &SliceFilter,
) -> SectionSlice {
    let normal = frame.normal_vec();
    let origin = frame.origin_point();

    let points: Vec<SectionPoint> = (0..events.len())
        .filter_map(|row| {
            let p = events.point(row);
            let depth = events.depth(row);
            let distance = distance_to_plane(&p, &normal, &origin);
            let on_section = on_section_coordinate(p.x, p.y, frame);

            let keep = distance < filter.max_distance
                && filter.depth_range.contains(depth)
                && on_section.abs() < filter.half_length;
            keep.then_some(SectionPoint {
                row,
                distance,
                depth,
                on_section,
            })
        })
        .collect();

    log::debug!(
        "section {}: kept {} of {} events",
        frame.index,
        points.len(),
        events.len()
    );
    SectionSlice {
        frame: *frame,
        points,
    }
}
