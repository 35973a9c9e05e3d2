#![warn(missing_docs)]

//! Point-in-shape selection for map and cross-section coordinates.
//!
//! A [`ShapeDescriptor`] places a circle, oval or rectangle at a center with
//! a counter-clockwise rotation; [`ShapeSelector`] returns the indices of the
//! points that fall inside it, in input order.
//!
//! # Example
//!
//! ```
//! use seismo_math::Point2;
//! use seismo_select::{select, ShapeDescriptor, ShapeSize};
//!
//! let rect = ShapeDescriptor::parse("rectangle", ShapeSize::SemiAxes(4.0, 2.0), Point2::origin(), 0.0)?;
//! let picked = select(&[1.0, 3.0, 0.0], &[0.5, 0.0, 1.5], &rect)?;
//! assert_eq!(picked, vec![0]);
//! # Ok::<(), seismo_select::SelectError>(())
//! ```

pub mod error;
pub mod select;
pub mod shape;

pub use error::{Result, SelectError};
pub use select::{rotate_about, select, select_points, ShapeSelector};
pub use shape::{Shape, ShapeDescriptor, ShapeKind, ShapeSize};
