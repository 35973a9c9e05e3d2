//! Shape selection on the map and on sections.

use seismo_catalog::Catalog;
use seismo_select::select;

use crate::config::{MapSelection, SectionSelection};
use crate::error::Result;
use crate::sections::CatalogSection;

/// Events picked by a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Rows of the source catalog, in source order.
    pub rows: Vec<usize>,
    /// The selected events, `catalog[i]` matching `rows[i]`.
    pub catalog: Catalog,
}

impl Selection {
    /// Number of selected events.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Select the events of `catalog` whose map position lies inside the shape.
///
/// Events and the shape center are projected with the selection's
/// projector, so shape sizes are in its units.
pub fn select_on_map(catalog: &Catalog, selection: &MapSelection) -> Result<Selection> {
    let projector = selection.projection.projector()?;
    let descriptor = selection.descriptor(&projector)?;
    let planar = projector.project(&catalog.lons(), &catalog.lats())?;

    let rows = select(&planar.x, &planar.y, &descriptor)?;
    log::info!(
        "map {} selected {} of {} events",
        selection.shape,
        rows.len(),
        catalog.len()
    );
    Ok(Selection {
        catalog: catalog.subset(&rows)?,
        rows,
    })
}

/// Select the events of one section whose `(on_section, depth)` lies
/// inside the shape.
///
/// Rows refer to the source catalog the section was cut from.
pub fn select_on_section(section: &CatalogSection, selection: &SectionSelection) -> Result<Selection> {
    let descriptor = selection.descriptor()?;
    let picked = select(&section.on_section_coords(), &section.depths(), &descriptor)?;

    log::info!(
        "section {} {} selected {} of {} events",
        section.frame.index,
        selection.shape,
        picked.len(),
        section.len()
    );
    Ok(Selection {
        rows: picked.iter().map(|&i| section.points[i].row).collect(),
        catalog: section.catalog.subset(&picked)?,
    })
}
