use geo_types::Point;

/// Trait for types that can provide a WGS84 position.
///
/// Implemented for `(f64, f64)` tuples and `geo_types::Point<f64>`, both in
/// `(longitude, latitude)` order to match GeoJSON and WKT axis order.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;

    fn longitude(&self) -> f64 {
        self.x()
    }

    fn latitude(&self) -> f64 {
        self.y()
    }
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}
