use geo_types::{Coord, LineString, Polygon, Rect};

/// Builds a counter-clockwise rectangle starting at the south-west corner.
pub fn create_cell_polygon(bounds: &Rect<f64>) -> Polygon<f64> {
    let (min, max) = (bounds.min(), bounds.max());
    let coords = vec![
        Coord { x: min.x, y: min.y },
        Coord { x: max.x, y: min.y },
        Coord { x: max.x, y: max.y },
        Coord { x: min.x, y: max.y },
        Coord { x: min.x, y: min.y },
    ];

    Polygon::new(LineString::from(coords), vec![])
}
