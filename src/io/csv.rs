use crate::cell::ScoreCell;
use crate::error::GeoScoreError;
use crate::geom::{parse_geometry, scoring_positions};
use crate::index::DomainPolicy;
use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

/// Output format for cell rectangle geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract a WGS84 position from CSV rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to score conversion.
///
/// Can be built in code or loaded from JSON:
///
/// ```
/// use geoscore::{CsvScoreConfig, DomainPolicy};
///
/// # fn main() -> Result<(), geoscore::GeoScoreError> {
/// let config = CsvScoreConfig::from_json_str(
///     r#"{"source":{"geometry_column":"geom"},"policy":"clamp"}"#,
/// )?;
/// assert_eq!(config.policy, DomainPolicy::Clamp);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvScoreConfig {
    pub source: CoordinateSource,
    #[serde(default)]
    pub exclude_columns: Vec<String>,
    #[serde(default)]
    pub policy: DomainPolicy,
    #[serde(default)]
    pub include_cell_geometry: Option<GeometryFormat>,
}

impl CsvScoreConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use geoscore::CsvScoreConfig;
    ///
    /// let config = CsvScoreConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            policy: DomainPolicy::default(),
            include_cell_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use geoscore::{CsvScoreConfig, DomainPolicy};
    ///
    /// let config = CsvScoreConfig::from_coords("Longitude", "Latitude")
    ///     .policy(DomainPolicy::Clamp);
    /// ```
    pub fn from_coords(lon_column: impl Into<String>, lat_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            policy: DomainPolicy::default(),
            include_cell_geometry: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, GeoScoreError> {
        serde_json::from_str(json).map_err(|e| GeoScoreError::ConfigError(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GeoScoreError> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GeoScoreError::ConfigError(e.to_string()))?;
        Self::from_json_str(&json)
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn policy(mut self, policy: DomainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Include the cell rectangle in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

pub trait CsvToScore {
    fn to_score_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvScoreConfig,
    ) -> Result<(), GeoScoreError>;
}

impl<P: AsRef<Path>> CsvToScore for P {
    fn to_score_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvScoreConfig,
    ) -> Result<(), GeoScoreError> {
        csv_to_score_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    geojson::Geometry::from(polygon).to_string()
}

fn column_index(
    headers: &csv::StringRecord,
    name: &str,
    role: &str,
) -> Result<usize, GeoScoreError> {
    if name.is_empty() {
        return Err(GeoScoreError::CsvError(format!(
            "{} column name cannot be empty",
            role
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| GeoScoreError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn parse_field(record: &csv::StringRecord, idx: usize, role: &str) -> Result<f64, GeoScoreError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| {
            GeoScoreError::CsvError(format!("Missing {} column at index {}", role, idx))
        })?
        .trim();
    raw.parse()
        .map_err(|_| GeoScoreError::CsvError(format!("Invalid {}: '{}'", role, raw)))
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file keyed by score.
///
/// Rows are streamed. The output starts with a `score` column, then
/// `cell_geometry` if requested, then every input column that is neither a
/// source column nor excluded. Multi-part geometries produce one output row
/// per part.
///
/// Rows are written to a temporary file next to `output_path` that is renamed
/// into place once every row has been scored. A failing row leaves any
/// existing file at `output_path` untouched.
///
/// # Example
///
/// ```no_run
/// use geoscore::{csv_to_score_csv, CsvScoreConfig, GeometryFormat};
///
/// let config = CsvScoreConfig::from_coords("lon", "lat")
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_score_csv("stations.csv", "stations_scored.csv", &config).unwrap();
/// ```
pub fn csv_to_score_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvScoreConfig,
) -> Result<(), GeoScoreError> {
    let file =
        File::open(csv_path.as_ref()).map_err(|e| GeoScoreError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| GeoScoreError::CsvError(e.to_string()))?
        .clone();

    // Source columns never make it to the output
    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_dir = match output_path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staging =
        NamedTempFile::new_in(out_dir).map_err(|e| GeoScoreError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(staging);

    let mut header_row: Vec<&str> = vec!["score"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| GeoScoreError::CsvError(e.to_string()))?;

    let (mut rows_read, mut rows_written) = (0usize, 0usize);
    for result in reader.records() {
        let record = result.map_err(|e| GeoScoreError::CsvError(e.to_string()))?;
        rows_read += 1;

        let positions: Vec<Point<f64>> = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    GeoScoreError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                scoring_positions(parse_geometry(geom_str)?)?
            }
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                let lon = parse_field(&record, *lon_idx, "longitude")?;
                let lat = parse_field(&record, *lat_idx, "latitude")?;
                vec![Point::new(lon, lat)]
            }
        };

        if positions.is_empty() {
            tracing::warn!(row = rows_read, "geometry produced no position, row dropped");
            continue;
        }

        for position in positions {
            let cell = ScoreCell::from_wgs84_with(&position, config.policy)?;
            let mut row: Vec<String> = vec![cell.score.to_string()];

            if let Some(format) = config.include_cell_geometry {
                let polygon = cell.to_polygon();
                row.push(match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                });
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| GeoScoreError::CsvError(e.to_string()))?;
            rows_written += 1;
        }
    }

    let staging = writer
        .into_inner()
        .map_err(|e| GeoScoreError::CsvError(e.to_string()))?;
    staging
        .persist(output_path.as_ref())
        .map_err(|e| GeoScoreError::IoError(e.to_string()))?;

    tracing::debug!(
        rows_read,
        rows_written,
        path = %output_path.as_ref().display(),
        "wrote score csv"
    );
    Ok(())
}
