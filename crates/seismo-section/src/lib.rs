#![warn(missing_docs)]

//! Cross-section generation for seismic event clouds.
//!
//! This crate slices a 3D event cloud (planar position plus depth) with a
//! family of parallel vertical planes:
//!
//! - **Frame building**: one frame per section, spaced along the strike of
//!   the structure, all sharing the strike-perpendicular normal
//! - **Slicing**: perpendicular distance to each plane, depth filtering,
//!   and projection onto the section trace
//!
//! # Example
//!
//! ```
//! use seismo_geo::PlanarProjector;
//! use seismo_section::{build_frames, slice_all, DepthRange, EventCloud, SliceFilter};
//!
//! let projector = PlanarProjector::utm(33, "km", "WGS84", "WGS84")?;
//! let planar = projector.project(&[13.10, 13.12], &[42.83, 42.84])?;
//! let depths = [8.5, 9.1];
//! let events = EventCloud::new(&planar, &depths)?;
//!
//! let center = projector.project_point(13.11, 42.83);
//! let frames = build_frames(&center, 155.0, 2, 2, 1.0)?;
//! let filter = SliceFilter {
//!     max_distance: 1.0,
//!     depth_range: DepthRange::new(0.0, 15.0)?,
//!     half_length: 10.0,
//! };
//!
//! for slice in slice_all(&events, &frames, &filter)? {
//!     println!("section {}: {} events", slice.frame.index, slice.len());
//! }
//! # Ok::<(), seismo_section::SectionError>(())
//! ```

pub mod error;
pub mod frame;
pub mod slice;
pub mod types;

pub use error::{Result, SectionError};
pub use frame::{build_frames, section_normal, section_offsets};
pub use slice::{distance_to_plane, on_section_coordinate, plane_constant, slice_all, slice_events};
pub use types::{DepthRange, EventCloud, SectionFrame, SectionPoint, SectionSlice, SliceFilter};
