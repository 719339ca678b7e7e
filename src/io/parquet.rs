use crate::cell::ScoreCell;
use crate::error::GeoScoreError;
use crate::io::arrow::{CellGeometry, ScoreCellsToArrow};
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::{DEFAULT_MAX_ROW_GROUP_SIZE, WriterProperties};
use parquet::format::SortingColumn;
use std::fs::File;
use std::path::Path;

/// Layout options for [`write_score_parquet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParquetOptions {
    pub geometry: CellGeometry,
    pub max_row_group_size: usize,
}

impl Default for ScoreParquetOptions {
    fn default() -> Self {
        Self {
            geometry: CellGeometry::default(),
            max_row_group_size: DEFAULT_MAX_ROW_GROUP_SIZE,
        }
    }
}

impl ScoreParquetOptions {
    pub fn geometry(mut self, geometry: CellGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Smaller row groups give tighter score ranges per group. Zero is treated as one.
    pub fn max_row_group_size(mut self, rows: usize) -> Self {
        self.max_row_group_size = rows.max(1);
        self
    }
}

fn io_error(e: impl std::fmt::Display) -> GeoScoreError {
    GeoScoreError::IoError(e.to_string())
}

/// Writes cells to GeoParquet sorted by score.
///
/// The file declares `score` as its ascending sort column, so every row
/// group covers one contiguous score range. Readers can then prune a score
/// range query (a Z-order box) using row group statistics alone.
pub fn write_score_parquet(
    cells: &[ScoreCell],
    path: impl AsRef<Path>,
    options: &ScoreParquetOptions,
) -> Result<(), GeoScoreError> {
    let batch = cells.to_record_batch(options.geometry)?;

    let geo_options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let mut encoder =
        GeoParquetRecordBatchEncoder::try_new(&batch.schema(), &geo_options).map_err(io_error)?;

    let properties = WriterProperties::builder()
        .set_max_row_group_size(options.max_row_group_size.max(1))
        .set_sorting_columns(Some(vec![SortingColumn {
            column_idx: 0,
            descending: false,
            nulls_first: false,
        }]))
        .build();

    let file = File::create(path.as_ref()).map_err(io_error)?;
    let mut writer =
        ArrowWriter::try_new(file, encoder.target_schema(), Some(properties)).map_err(io_error)?;
    writer
        .write(&encoder.encode_record_batch(&batch).map_err(io_error)?)
        .map_err(io_error)?;
    writer.append_key_value_metadata(encoder.into_keyvalue().map_err(io_error)?);
    let metadata = writer.close().map_err(io_error)?;

    tracing::debug!(
        rows = batch.num_rows(),
        row_groups = metadata.row_groups.len(),
        path = %path.as_ref().display(),
        "wrote score parquet"
    );
    Ok(())
}

pub trait ScoreCellsToGeoParquet {
    fn to_geoparquet(
        &self,
        path: impl AsRef<Path>,
        options: &ScoreParquetOptions,
    ) -> Result<(), GeoScoreError>;
}

impl ScoreCellsToGeoParquet for [ScoreCell] {
    fn to_geoparquet(
        &self,
        path: impl AsRef<Path>,
        options: &ScoreParquetOptions,
    ) -> Result<(), GeoScoreError> {
        write_score_parquet(self, path, options)
    }
}

impl ScoreCellsToGeoParquet for Vec<ScoreCell> {
    fn to_geoparquet(
        &self,
        path: impl AsRef<Path>,
        options: &ScoreParquetOptions,
    ) -> Result<(), GeoScoreError> {
        write_score_parquet(self, path, options)
    }
}
