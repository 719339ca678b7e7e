mod parse;
mod polygon;

pub use parse::{parse_geojson, parse_geometry, parse_wkt, scoring_positions};
pub use polygon::create_cell_polygon;
