pub mod arrow;
pub mod csv;
pub mod parquet;

pub use self::arrow::{CellGeometry, ScoreCellsToArrow, sort_by_score};
pub use self::csv::{
    CoordinateSource, CsvScoreConfig, CsvToScore, GeometryFormat, csv_to_score_csv,
};
pub use self::parquet::{ScoreCellsToGeoParquet, ScoreParquetOptions, write_score_parquet};
