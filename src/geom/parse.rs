use crate::error::GeoScoreError;
use geo::Centroid;
use geo_types::{Geometry, Point};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a geometry string. A leading `{` means GeoJSON, anything else is read as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, GeoScoreError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(GeoScoreError::GeometryParseError(
            "Empty geometry string".to_string(),
        ));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or single feature.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, GeoScoreError> {
    let parse_err = |e: geojson::Error| GeoScoreError::GeometryParseError(e.to_string());

    let geometry = match s.parse::<GeoJson>().map_err(parse_err)? {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat.geometry.ok_or_else(|| {
            GeoScoreError::GeometryParseError("Feature has no geometry".to_string())
        })?,
        GeoJson::FeatureCollection(_) => {
            return Err(GeoScoreError::GeometryParseError(
                "FeatureCollection not supported, use one geometry per row".to_string(),
            ));
        }
    };

    Geometry::try_from(geometry).map_err(parse_err)
}

pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, GeoScoreError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| GeoScoreError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        GeoScoreError::GeometryParseError("WKT has no geo-types equivalent".to_string())
    })
}

/// Reduces a geometry to the positions that get scored.
///
/// Points are kept as-is, polygons are represented by their centroid and
/// collections are flattened. Lines have no single position and are rejected.
pub fn scoring_positions(geom: Geometry<f64>) -> Result<Vec<Point<f64>>, GeoScoreError> {
    match geom {
        Geometry::Point(pt) => Ok(vec![pt]),
        Geometry::MultiPoint(mp) => Ok(mp.0),
        Geometry::Polygon(poly) => Ok(poly.centroid().into_iter().collect()),
        Geometry::MultiPolygon(mp) => Ok(mp.0.iter().filter_map(|p| p.centroid()).collect()),
        Geometry::Rect(rect) => Ok(vec![rect.centroid()]),
        Geometry::GeometryCollection(gc) => {
            let mut positions = Vec::new();
            for g in gc.0 {
                positions.extend(scoring_positions(g)?);
            }
            Ok(positions)
        }
        other => Err(GeoScoreError::GeometryParseError(format!(
            "Unsupported geometry type: {}",
            geometry_name(&other)
        ))),
    }
}

fn geometry_name(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
