//! Cross sections of a whole catalog.

use seismo_catalog::{Catalog, Event};
use seismo_section::{build_frames, slice_all, EventCloud, SectionFrame, SectionPoint};
use serde::Serialize;

use crate::config::SectionSettings;
use crate::error::Result;

/// One section of a catalog: the frame, the retained section points and
/// the matching catalog rows, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSection {
    /// The cutting plane.
    pub frame: SectionFrame,
    /// Retained events; `points[i].row` indexes the source catalog.
    pub points: Vec<SectionPoint>,
    /// Copies of the retained events, `catalog[i]` matching `points[i]`,
    /// with depths normalized to positive-down.
    pub catalog: Catalog,
}

/// A catalog event annotated with its position on a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRecord<'a> {
    /// The source event with all pass-through attributes.
    #[serde(flatten)]
    pub event: &'a Event,
    /// Signed position along the section trace.
    pub on_section: f64,
    /// Distance to the section plane.
    pub distance: f64,
}

impl CatalogSection {
    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no event was retained.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Source catalog rows of the retained events.
    pub fn rows(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.row).collect()
    }

    /// On-section coordinates of the retained events.
    pub fn on_section_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.on_section).collect()
    }

    /// Depths of the retained events, positive down.
    pub fn depths(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.depth).collect()
    }

    /// Retained events joined with their section coordinates.
    pub fn records(&self) -> Vec<SectionRecord<'_>> {
        self.catalog
            .iter()
            .zip(&self.points)
            .map(|(event, point)| SectionRecord {
                event,
                on_section: point.on_section,
                distance: point.distance,
            })
            .collect()
    }
}

/// Slice `catalog` with the section family described by `settings`.
///
/// Events and the family center are projected with the same projector;
/// depths are taken as absolute values, in the section tables too; the
/// input catalog is not modified. Output is ordered by frame index.
pub fn cross_sections(catalog: &Catalog, settings: &SectionSettings) -> Result<Vec<CatalogSection>> {
    settings.validate()?;
    let filter = settings.filter()?;
    let projector = settings.projection.projector()?;

    let planar = projector.project(&catalog.lons(), &catalog.lats())?;
    let depths = catalog.depths();
    let events = EventCloud::new(&planar, &depths)?;

    let center = projector.project_point(settings.center[0], settings.center[1]);
    let [num_left, num_right] = settings.num_sections;
    let frames = build_frames(&center, settings.strike, num_left, num_right, settings.spacing)?;

    slice_all(&events, &frames, &filter)?
        .into_iter()
        .map(|slice| {
            let mut catalog = catalog.subset(&slice.rows())?;
            for (event, point) in catalog.events_mut().iter_mut().zip(&slice.points) {
                event.depth = point.depth;
            }
            Ok(CatalogSection {
                frame: slice.frame,
                points: slice.points,
                catalog,
            })
        })
        .collect()
}
