use crate::coord::Coordinate;
use crate::error::GeoScoreError;
use crate::geom::create_cell_polygon;
use crate::index::{DomainPolicy, GridCoordinate};
use crate::io::arrow::{CellGeometry, ScoreCellsToArrow};
use crate::io::parquet::{ScoreCellsToGeoParquet, ScoreParquetOptions};
use arrow_array::RecordBatch;
use geo_types::{Point, Polygon, Rect};
use serde_json::json;
use std::path::Path;

/// A single cell of the 2^26 x 2^26 latitude/longitude grid.
///
/// Each `ScoreCell` carries its interleaved score, its grid position and the
/// decoded center point in WGS84 (EPSG:4326), with `x` as longitude.
///
/// # Example
///
/// ```
/// use geoscore::ScoreCell;
///
/// # fn main() -> Result<(), geoscore::GeoScoreError> {
/// let cell = ScoreCell::from_wgs84(&(-0.1278, 51.5074))?;
/// assert_eq!(cell.score, 2163557714755072);
///
/// let restored = ScoreCell::from_score(cell.score);
/// assert_eq!(cell, restored);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScoreCell {
    /// Interleaved 52-bit score
    pub score: u64,
    /// Grid numbers on each axis
    pub grid: GridCoordinate,
    /// Cell center, `x` = longitude, `y` = latitude
    pub center: Point<f64>,
}

impl PartialEq for ScoreCell {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for ScoreCell {}

impl ScoreCell {
    fn from_grid(grid: GridCoordinate) -> Self {
        let (lat, lon) = grid.center();
        Self {
            score: grid.to_score(),
            grid,
            center: Point::new(lon, lat),
        }
    }

    /// Create a ScoreCell from a WGS84 (lon/lat) coordinate, rejecting
    /// positions outside the grid domain.
    pub fn from_wgs84(coord: &impl Coordinate) -> Result<Self, GeoScoreError> {
        Self::from_wgs84_with(coord, DomainPolicy::Reject)
    }

    pub fn from_wgs84_with(
        coord: &impl Coordinate,
        policy: DomainPolicy,
    ) -> Result<Self, GeoScoreError> {
        let grid = GridCoordinate::from_coordinate(coord.latitude(), coord.longitude(), policy)?;
        Ok(Self::from_grid(grid))
    }

    /// Create a ScoreCell from a stored score.
    ///
    /// Every `u64` decodes to some cell; the stored score is kept as given.
    pub fn from_score(score: u64) -> Self {
        Self {
            score,
            ..Self::from_grid(GridCoordinate::from_score(score))
        }
    }

    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    pub fn bounds(&self) -> Rect<f64> {
        self.grid.bounds()
    }

    /// Returns `true` if the coordinate encodes to this cell.
    ///
    /// Ownership is decided by the same normalization as [`crate::encode`], not
    /// by comparing against the float edges from [`ScoreCell::bounds`], which
    /// can round to the neighbouring cell. Out-of-domain coordinates belong to
    /// no cell.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        GridCoordinate::from_coordinate(coord.latitude(), coord.longitude(), DomainPolicy::Reject)
            .is_ok_and(|grid| grid == self.grid)
    }

    /// Converts this cell to a closed rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_cell_polygon(&self.bounds())
    }

    /// Converts this cell to a GeoJSON feature with the score and grid numbers as properties.
    pub fn to_geojson_feature(&self) -> geojson::Feature {
        let properties = json!({
            "score": self.score,
            "grid_lat": self.grid.lat,
            "grid_lon": self.grid.lon,
        });

        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.to_polygon())),
            id: None,
            properties: properties.as_object().cloned(),
            foreign_members: None,
        }
    }

    /// Converts this cell to a one-row RecordBatch.
    pub fn to_record_batch(&self, geometry: CellGeometry) -> Result<RecordBatch, GeoScoreError> {
        std::slice::from_ref(self).to_record_batch(geometry)
    }

    /// Writes this cell to a GeoParquet file with default options.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeoScoreError> {
        std::slice::from_ref(self).to_geoparquet(path, &ScoreParquetOptions::default())
    }
}
