/// Southern edge of the Web Mercator latitude band.
pub const MIN_LATITUDE: f64 = -85.05112878;

/// Northern edge of the Web Mercator latitude band.
pub const MAX_LATITUDE: f64 = 85.05112878;

pub const MIN_LONGITUDE: f64 = -180.0;

pub const MAX_LONGITUDE: f64 = 180.0;

/// Latitude span covered by the grid, in degrees
pub const LATITUDE_RANGE: f64 = MAX_LATITUDE - MIN_LATITUDE;

/// Longitude span covered by the grid, in degrees
pub const LONGITUDE_RANGE: f64 = MAX_LONGITUDE - MIN_LONGITUDE;

/// Bits of precision per axis
pub const GRID_BITS: u32 = 26;

/// Number of grid cells along each axis (2^26)
pub const GRID_SIZE: u32 = 1 << GRID_BITS;

/// Largest valid grid number on either axis
pub const MAX_GRID_NUMBER: u32 = GRID_SIZE - 1;

/// `GRID_SIZE` as a float, used by the normalization math
pub(crate) const GRID_SCALE: f64 = GRID_SIZE as f64;

/// Mask of the score bits a conforming encode can set (2 * GRID_BITS)
pub const SCORE_MASK: u64 = (1 << (2 * GRID_BITS)) - 1;
