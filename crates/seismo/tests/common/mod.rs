use seismo::geo::PlanarPoint;
use seismo::{Catalog, Event, ProjectionSettings};

pub const CENTER: [f64; 2] = [13.1, 42.8];

pub fn projection() -> ProjectionSettings {
    ProjectionSettings {
        zone: 33,
        ..Default::default()
    }
}

/// Events placed at planar offsets (km) from `CENTER`.
///
/// | row | id | dx   | dy   | depth |
/// |-----|----|------|------|-------|
/// | 0   | A  | 0.0  | 3.0  | 5     |
/// | 1   | B  | 2.2  | -1.2 | 7     |
/// | 2   | C  | 0.1  | 20.0 | 5     |
/// | 3   | D  | -2.0 | 0.0  | 40    |
/// | 4   | E  | 0.0  | 0.0  | -4    |
/// | 5   | F  | -1.8 | -6.0 | 12    |
pub fn catalog() -> Catalog {
    let projector = projection().projector().unwrap();
    let center = projector.project_point(CENTER[0], CENTER[1]);
    let placed = [
        ("A", 0.0, 3.0, 5.0),
        ("B", 2.2, -1.2, 7.0),
        ("C", 0.1, 20.0, 5.0),
        ("D", -2.0, 0.0, 40.0),
        ("E", 0.0, 0.0, -4.0),
        ("F", -1.8, -6.0, 12.0),
    ];
    placed
        .iter()
        .map(|&(id, dx, dy, depth)| {
            let point = PlanarPoint {
                x: center.x + dx,
                y: center.y + dy,
                crs: center.crs,
            };
            let (lon, lat) = projector.unproject_point(&point).unwrap();
            Event::new(lon, lat, depth).with_id(id)
        })
        .collect()
}

pub fn ids(catalog: &Catalog) -> Vec<String> {
    catalog.iter().filter_map(|e| e.id.clone()).collect()
}
