use crate::error::GeoScoreError;
use crate::index::bits::interleave;
use crate::index::constants::{
    LATITUDE_RANGE, LONGITUDE_RANGE, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};
use crate::index::grid::{DomainPolicy, GridCoordinate, normalize};
use rayon::prelude::*;

/// Encodes a latitude/longitude pair into a 52-bit interleaved score.
///
/// Out-of-range values are clamped to the grid domain. A NaN axis has no
/// position to clamp to and comes out as grid number 0; use [`try_encode`] to
/// have it rejected instead.
///
/// # Example
/// ```
/// use geoscore::encode;
///
/// assert_eq!(encode(13.7220, 100.5252), 3962257306574459);
/// ```
pub fn encode(latitude: f64, longitude: f64) -> u64 {
    let lat = normalize(
        latitude.clamp(MIN_LATITUDE, MAX_LATITUDE),
        MIN_LATITUDE,
        LATITUDE_RANGE,
    );
    let lon = normalize(
        longitude.clamp(MIN_LONGITUDE, MAX_LONGITUDE),
        MIN_LONGITUDE,
        LONGITUDE_RANGE,
    );
    interleave(lat, lon)
}

/// Encodes a coordinate, rejecting anything outside the grid domain.
pub fn try_encode(latitude: f64, longitude: f64) -> Result<u64, GeoScoreError> {
    encode_with(latitude, longitude, DomainPolicy::Reject)
}

/// Encodes a coordinate under an explicit [`DomainPolicy`].
pub fn encode_with(
    latitude: f64,
    longitude: f64,
    policy: DomainPolicy,
) -> Result<u64, GeoScoreError> {
    GridCoordinate::from_coordinate(latitude, longitude, policy).map(|grid| grid.to_score())
}

/// Decodes a score into the `(latitude, longitude)` center of its grid cell.
///
/// The result is within half a cell of whatever was encoded. Bits 52..64 are
/// never set by [`encode`] but are accepted here without complaint.
///
/// # Example
/// ```
/// use geoscore::decode;
///
/// let (lat, lon) = decode(1791873974549446);
/// assert!((lat - 40.712798986951505).abs() < 1e-6);
/// assert!((lon - -74.00600105524063).abs() < 1e-6);
/// ```
pub fn decode(score: u64) -> (f64, f64) {
    GridCoordinate::from_score(score).center()
}

/// Encodes `(latitude, longitude)` pairs in parallel with the clamping policy.
pub fn encode_many(coords: &[(f64, f64)]) -> Vec<u64> {
    coords
        .par_iter()
        .map(|&(lat, lon)| encode(lat, lon))
        .collect()
}

/// Encodes `(latitude, longitude)` pairs in parallel, failing if any pair is rejected.
pub fn try_encode_many(
    coords: &[(f64, f64)],
    policy: DomainPolicy,
) -> Result<Vec<u64>, GeoScoreError> {
    coords
        .par_iter()
        .map(|&(lat, lon)| encode_with(lat, lon, policy))
        .collect()
}

/// Decodes scores in parallel into cell-center `(latitude, longitude)` pairs.
pub fn decode_many(scores: &[u64]) -> Vec<(f64, f64)> {
    scores.par_iter().map(|&score| decode(score)).collect()
}
