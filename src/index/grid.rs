use crate::error::GeoScoreError;
use crate::index::bits::{deinterleave, interleave};
use crate::index::constants::{
    GRID_SCALE, LATITUDE_RANGE, LONGITUDE_RANGE, MAX_GRID_NUMBER, MAX_LATITUDE, MAX_LONGITUDE,
    MIN_LATITUDE, MIN_LONGITUDE,
};
use geo_types::{Rect, coord};
use serde::{Deserialize, Serialize};

/// What to do with a coordinate that falls outside the grid domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Return a `LatitudeOutOfRange` / `LongitudeOutOfRange` error.
    #[default]
    Reject,
    /// Pin the value to the nearest bound. NaN is still rejected.
    Clamp,
}

/// Position of a coordinate on the 2^26 x 2^26 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub lat: u32,
    pub lon: u32,
}

impl GridCoordinate {
    /// Normalizes a latitude/longitude pair onto the grid.
    ///
    /// A value sitting exactly on the upper bound of its axis lands in the last
    /// cell rather than one past it.
    pub fn from_coordinate(
        latitude: f64,
        longitude: f64,
        policy: DomainPolicy,
    ) -> Result<Self, GeoScoreError> {
        let latitude = check_axis(latitude, MIN_LATITUDE, MAX_LATITUDE, policy)
            .ok_or(GeoScoreError::LatitudeOutOfRange(latitude))?;
        let longitude = check_axis(longitude, MIN_LONGITUDE, MAX_LONGITUDE, policy)
            .ok_or(GeoScoreError::LongitudeOutOfRange(longitude))?;

        Ok(Self {
            lat: normalize(latitude, MIN_LATITUDE, LATITUDE_RANGE),
            lon: normalize(longitude, MIN_LONGITUDE, LONGITUDE_RANGE),
        })
    }

    /// Splits a score into its grid coordinate. Total over all `u64` values.
    pub fn from_score(score: u64) -> Self {
        let (lat, lon) = deinterleave(score);
        Self { lat, lon }
    }

    /// Latitude goes to the even bits, longitude to the odd bits.
    pub fn to_score(&self) -> u64 {
        interleave(self.lat, self.lon)
    }

    /// Returns the cell's extent, `x` being longitude and `y` latitude.
    pub fn bounds(&self) -> Rect<f64> {
        let (lat_min, lat_max) = cell_edges(self.lat, MIN_LATITUDE, LATITUDE_RANGE);
        let (lon_min, lon_max) = cell_edges(self.lon, MIN_LONGITUDE, LONGITUDE_RANGE);
        Rect::new(
            coord! { x: lon_min, y: lat_min },
            coord! { x: lon_max, y: lat_max },
        )
    }

    /// Returns the `(latitude, longitude)` midpoint of the cell.
    pub fn center(&self) -> (f64, f64) {
        let (lat_min, lat_max) = cell_edges(self.lat, MIN_LATITUDE, LATITUDE_RANGE);
        let (lon_min, lon_max) = cell_edges(self.lon, MIN_LONGITUDE, LONGITUDE_RANGE);
        ((lat_min + lat_max) / 2.0, (lon_min + lon_max) / 2.0)
    }
}

/// Size of one grid cell in degrees, as `(latitude, longitude)`.
pub fn cell_size() -> (f64, f64) {
    (LATITUDE_RANGE / GRID_SCALE, LONGITUDE_RANGE / GRID_SCALE)
}

fn check_axis(value: f64, min: f64, max: f64, policy: DomainPolicy) -> Option<f64> {
    if value.is_nan() {
        return None;
    }
    match policy {
        DomainPolicy::Reject => (min..=max).contains(&value).then_some(value),
        DomainPolicy::Clamp => Some(value.clamp(min, max)),
    }
}

/// Truncating linear map from `[min, min + range]` to a grid number.
///
/// Callers must have checked the domain first. The float to int cast saturates,
/// so NaN comes out as 0.
pub(crate) fn normalize(value: f64, min: f64, range: f64) -> u32 {
    let normalized = GRID_SCALE * (value - min) / range;
    (normalized as u32).min(MAX_GRID_NUMBER)
}

fn cell_edges(grid_number: u32, min: f64, range: f64) -> (f64, f64) {
    let lower = min + range * (grid_number as f64 / GRID_SCALE);
    let upper = min + range * ((grid_number as u64 + 1) as f64 / GRID_SCALE);
    (lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::GRID_SIZE;

    #[test]
    fn test_min_bounds_map_to_first_cell() -> Result<(), GeoScoreError> {
        let grid =
            GridCoordinate::from_coordinate(MIN_LATITUDE, MIN_LONGITUDE, DomainPolicy::Reject)?;
        assert_eq!(grid, GridCoordinate { lat: 0, lon: 0 });
        Ok(())
    }

    #[test]
    fn test_max_bounds_map_to_last_cell() -> Result<(), GeoScoreError> {
        let grid =
            GridCoordinate::from_coordinate(MAX_LATITUDE, MAX_LONGITUDE, DomainPolicy::Reject)?;
        assert_eq!(grid.lat, GRID_SIZE - 1);
        assert_eq!(grid.lon, GRID_SIZE - 1);
        Ok(())
    }

    #[test]
    fn test_reject_out_of_range() {
        let result = GridCoordinate::from_coordinate(86.0, 0.0, DomainPolicy::Reject);
        assert_eq!(result, Err(GeoScoreError::LatitudeOutOfRange(86.0)));

        let result = GridCoordinate::from_coordinate(0.0, -180.5, DomainPolicy::Reject);
        assert_eq!(result, Err(GeoScoreError::LongitudeOutOfRange(-180.5)));
    }

    #[test]
    fn test_clamp_out_of_range() -> Result<(), GeoScoreError> {
        let grid = GridCoordinate::from_coordinate(90.0, -200.0, DomainPolicy::Clamp)?;
        assert_eq!(grid.lat, GRID_SIZE - 1);
        assert_eq!(grid.lon, 0);

        let grid = GridCoordinate::from_coordinate(-90.0, 500.0, DomainPolicy::Clamp)?;
        assert_eq!(grid.lat, 0);
        assert_eq!(grid.lon, GRID_SIZE - 1);
        Ok(())
    }

    #[test]
    fn test_nan_rejected_under_both_policies() {
        for policy in [DomainPolicy::Reject, DomainPolicy::Clamp] {
            let result = GridCoordinate::from_coordinate(f64::NAN, 0.0, policy);
            assert!(matches!(result, Err(GeoScoreError::LatitudeOutOfRange(v)) if v.is_nan()));

            let result = GridCoordinate::from_coordinate(0.0, f64::NAN, policy);
            assert!(matches!(result, Err(GeoScoreError::LongitudeOutOfRange(v)) if v.is_nan()));
        }
    }

    #[test]
    fn test_score_round_trip() {
        let grid = GridCoordinate {
            lat: 12_345_678,
            lon: 54_321,
        };
        assert_eq!(GridCoordinate::from_score(grid.to_score()), grid);
    }

    #[test]
    fn test_origin_cell_bounds() {
        let grid = GridCoordinate { lat: 0, lon: 0 };
        let bounds = grid.bounds();
        let (lat_size, lon_size) = cell_size();

        assert_eq!(bounds.min().x, MIN_LONGITUDE);
        assert_eq!(bounds.min().y, MIN_LATITUDE);
        assert!((bounds.width() - lon_size).abs() < 1e-12);
        assert!((bounds.height() - lat_size).abs() < 1e-12);
    }

    #[test]
    fn test_last_cell_reaches_upper_bound() {
        let grid = GridCoordinate {
            lat: MAX_GRID_NUMBER,
            lon: MAX_GRID_NUMBER,
        };
        let bounds = grid.bounds();
        assert!((bounds.max().x - MAX_LONGITUDE).abs() < 1e-9);
        assert!((bounds.max().y - MAX_LATITUDE).abs() < 1e-9);
    }

    #[test]
    fn test_center_is_midpoint_of_bounds() {
        let grid = GridCoordinate {
            lat: 40_000_000,
            lon: 7,
        };
        let bounds = grid.bounds();
        let (lat, lon) = grid.center();
        assert!((lat - bounds.center().y).abs() < 1e-12);
        assert!((lon - bounds.center().x).abs() < 1e-12);
    }

    #[test]
    fn test_cell_size_at_26_bits() {
        let (lat_size, lon_size) = cell_size();
        assert!((lat_size - 2.5347e-6).abs() < 1e-9);
        assert!((lon_size - 5.3644e-6).abs() < 1e-9);
    }

    #[test]
    fn test_policy_serde_names() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&DomainPolicy::Clamp)?, "\"clamp\"");
        let policy: DomainPolicy = serde_json::from_str("\"reject\"")?;
        assert_eq!(policy, DomainPolicy::Reject);
        Ok(())
    }
}
