//! Seismic event catalogs.
//!
//! A [`Catalog`] is an ordered table of events stored as a JSON array.
//! Rows are identified by position, so index lists produced by slicing or
//! selection can be turned back into catalog subsets with
//! [`Catalog::subset`].

pub mod catalog;
pub mod decluster;
pub mod error;

pub use catalog::{parse_origin_time, Catalog, Event};
pub use decluster::exclude_close_timed_events;
pub use error::{CatalogError, Result};
