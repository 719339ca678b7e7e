//! # geoscore
//!
//! Maps a WGS84 latitude/longitude pair onto a 2^26 x 2^26 grid and
//! interleaves the two grid numbers into a single sortable `u64` score
//! (a Morton / Z-order key). Decoding returns the center of the grid cell,
//! which is within half a cell (about 1.3e-6 degrees of latitude and 2.7e-6
//! degrees of longitude) of the encoded point.
//!
//! ### 1. `encode` / `decode` - The Codec
//!
//! ```
//! use geoscore::{decode, encode};
//!
//! let score = encode(51.5074, -0.1278);
//! assert_eq!(score, 2163557714755072);
//!
//! let (lat, lon) = decode(score);
//! assert!((lat - 51.5074).abs() < 1e-5);
//! assert!((lon - -0.1278).abs() < 1e-5);
//! ```
//!
//! `encode` clamps out-of-range input. Use [`try_encode`] or [`encode_with`]
//! to reject it instead.
//!
//! ### 2. `ScoreCell` - Single Cell Operations
//!
//! ```
//! use geoscore::ScoreCell;
//!
//! # fn main() -> Result<(), geoscore::GeoScoreError> {
//! let cell = ScoreCell::from_wgs84(&(100.5252, 13.7220))?;
//! println!("{} -> {:?}", cell.score, cell.bounds());
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToScore` - CSV File Conversion
//!
//! ```no_run
//! use geoscore::{CsvScoreConfig, CsvToScore, DomainPolicy, GeometryFormat};
//!
//! let config = CsvScoreConfig::new("geometry")
//!     .exclude(vec!["notes".into()])
//!     .policy(DomainPolicy::Clamp)
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_score_csv("output.csv", &config).unwrap();
//! ```

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;

pub use cell::ScoreCell;
pub use coord::Coordinate;
pub use error::GeoScoreError;
pub use geom::{create_cell_polygon, parse_geometry};
pub use index::{
    DomainPolicy, GRID_BITS, GRID_SIZE, GridCoordinate, MAX_GRID_NUMBER, MAX_LATITUDE,
    MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, SCORE_MASK, cell_size, compact, decode,
    decode_many, deinterleave, encode, encode_many, encode_with, interleave, spread, try_encode,
    try_encode_many,
};
pub use io::{
    CellGeometry, CoordinateSource, CsvScoreConfig, CsvToScore, GeometryFormat,
    ScoreCellsToArrow, ScoreCellsToGeoParquet, ScoreParquetOptions, csv_to_score_csv,
    sort_by_score, write_score_parquet,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), GeoScoreError> {
        let score = try_encode(35.6895, 139.6917)?;
        assert_eq!(score, 4171231230197045);

        let cell = ScoreCell::from_score(score);
        assert!(cell.contains(&(139.6917, 35.6895)));

        let (lat, lon) = decode(score);
        assert_eq!((cell.latitude(), cell.longitude()), (lat, lon));

        let polygon = cell.to_polygon();
        assert_eq!(polygon.exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_using_geo_types_macros() -> Result<(), GeoScoreError> {
        let pt = point! { x: 77.2167, y: 28.6667 };
        let cell = ScoreCell::from_wgs84(&pt)?;
        assert_eq!(cell.score, 3631527070936756);
        Ok(())
    }

    #[test]
    fn test_grid_and_codec_agree() -> Result<(), GeoScoreError> {
        let grid = GridCoordinate::from_coordinate(27.7017, 85.3206, DomainPolicy::Reject)?;
        assert_eq!(grid.to_score(), encode(27.7017, 85.3206));
        assert_eq!(deinterleave(grid.to_score()), (grid.lat, grid.lon));
        assert_eq!(interleave(grid.lat, grid.lon), 3639507404773204);
        Ok(())
    }

    #[test]
    fn test_nearby_points_share_score_prefix() {
        let a = encode(48.85340, 2.34880);
        let b = encode(48.85345, 2.34885);
        let far = encode(-33.8688, 151.2093);

        let common = |x: u64, y: u64| (x ^ y).leading_zeros();
        assert!(common(a, b) > common(a, far));
    }

    #[test]
    fn test_scores_sort_cells_in_z_order() {
        let mut cells: Vec<ScoreCell> = [(1u32, 1u32), (0, 1), (1, 0), (0, 0)]
            .iter()
            .map(|&(lat, lon)| ScoreCell::from_score(interleave(lat, lon)))
            .collect();
        cells.sort_by_key(|c| c.score);

        let order: Vec<(u32, u32)> = cells.iter().map(|c| (c.grid.lat, c.grid.lon)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
