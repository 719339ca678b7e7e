/// Error type for geoscore operations.
#[derive(Debug, PartialEq)]
pub enum GeoScoreError {
    /// Latitude is NaN or outside the Web Mercator band (±85.05112878).
    LatitudeOutOfRange(f64),
    /// Longitude is NaN or outside -180..=180.
    LongitudeOutOfRange(f64),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// Configuration could not be loaded.
    ConfigError(String),
}

impl std::fmt::Display for GeoScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoScoreError::LatitudeOutOfRange(v) => write!(f, "Latitude out of range: {}", v),
            GeoScoreError::LongitudeOutOfRange(v) => write!(f, "Longitude out of range: {}", v),
            GeoScoreError::IoError(msg) => write!(f, "IO error: {}", msg),
            GeoScoreError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            GeoScoreError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            GeoScoreError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for GeoScoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_domain_errors() {
        assert_eq!(
            GeoScoreError::LatitudeOutOfRange(91.0).to_string(),
            "Latitude out of range: 91"
        );
        assert_eq!(
            GeoScoreError::LongitudeOutOfRange(-181.5).to_string(),
            "Longitude out of range: -181.5"
        );
    }

    #[test]
    fn test_display_wrapped_errors() {
        let err = GeoScoreError::CsvError("Geometry column 'geom' not found".to_string());
        assert_eq!(err.to_string(), "CSV error: Geometry column 'geom' not found");
    }
}
