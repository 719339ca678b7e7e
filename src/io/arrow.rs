use crate::cell::ScoreCell;
use crate::error::GeoScoreError;
use arrow_array::{ArrayRef, RecordBatch, UInt32Array, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::{GeoArrowArray, IntoArrow};
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

/// Geometry written alongside each score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellGeometry {
    /// Decoded cell center, the value [`crate::decode`] returns
    #[default]
    Center,
    /// Cell rectangle
    Bounds,
}

fn epsg_4326() -> Arc<Metadata> {
    Arc::new(Metadata::new(
        Crs::from_authority_code("EPSG:4326".to_string()),
        None,
    ))
}

/// Copies the cells into score order. Because scores are Z-order keys, the
/// result is also spatially clustered.
pub fn sort_by_score(cells: &[ScoreCell]) -> Vec<ScoreCell> {
    let mut sorted = cells.to_vec();
    sorted.par_sort_unstable_by_key(|cell| cell.score);
    sorted
}

/// Arrow export for collections of [`ScoreCell`]s.
///
/// Geometry arrays keep input order; `to_record_batch` sorts by score.
pub trait ScoreCellsToArrow {
    fn to_arrow_centers(&self) -> PointArray;
    fn to_arrow_bounds(&self) -> PolygonArray;
    /// Builds a `score, grid_lat, grid_lon, geometry` batch with rows in ascending score order.
    fn to_record_batch(&self, geometry: CellGeometry) -> Result<RecordBatch, GeoScoreError>;
}

impl ScoreCellsToArrow for [ScoreCell] {
    fn to_arrow_centers(&self) -> PointArray {
        let mut builder =
            PointBuilder::with_capacity(PointType::new(Dimension::XY, epsg_4326()), self.len());
        for cell in self {
            builder.push_point(Some(&cell.center));
        }
        builder.finish()
    }

    fn to_arrow_bounds(&self) -> PolygonArray {
        let rects: Vec<_> = self.par_iter().map(ScoreCell::to_polygon).collect();
        PolygonBuilder::from_polygons(&rects, PolygonType::new(Dimension::XY, epsg_4326()))
            .finish()
    }

    fn to_record_batch(&self, geometry: CellGeometry) -> Result<RecordBatch, GeoScoreError> {
        let sorted = sort_by_score(self);

        let (geometry_field, geometry_column): (Field, ArrayRef) = match geometry {
            CellGeometry::Center => {
                let centers = sorted.to_arrow_centers();
                (
                    centers.extension_type().to_field("geometry", false),
                    centers.into_array_ref(),
                )
            }
            CellGeometry::Bounds => {
                let bounds = sorted.to_arrow_bounds();
                (
                    bounds.extension_type().to_field("geometry", false),
                    bounds.into_array_ref(),
                )
            }
        };

        let schema = Arc::new(Schema::new(vec![
            Field::new("score", DataType::UInt64, false),
            Field::new("grid_lat", DataType::UInt32, false),
            Field::new("grid_lon", DataType::UInt32, false),
            geometry_field,
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt64Array::from_iter_values(sorted.iter().map(|c| c.score))),
            Arc::new(UInt32Array::from_iter_values(sorted.iter().map(|c| c.grid.lat))),
            Arc::new(UInt32Array::from_iter_values(sorted.iter().map(|c| c.grid.lon))),
            geometry_column,
        ];

        RecordBatch::try_new(schema, columns).map_err(|e| GeoScoreError::IoError(e.to_string()))
    }
}

impl ScoreCellsToArrow for Vec<ScoreCell> {
    fn to_arrow_centers(&self) -> PointArray {
        self.as_slice().to_arrow_centers()
    }

    fn to_arrow_bounds(&self) -> PolygonArray {
        self.as_slice().to_arrow_bounds()
    }

    fn to_record_batch(&self, geometry: CellGeometry) -> Result<RecordBatch, GeoScoreError> {
        self.as_slice().to_record_batch(geometry)
    }
}
