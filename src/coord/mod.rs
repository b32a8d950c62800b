use geo_types::Point;

/// Trait for types that can provide WGS84 longitude/latitude coordinates.
///
/// Implemented for `(f64, f64)` tuples ordered `(lon, lat)` and for
/// `geo_types::Point<f64>`, matching the x/y order used by GeoJSON and WKT.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;

    fn lon(&self) -> f64 {
        self.x()
    }

    fn lat(&self) -> f64 {
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

impl Coordinate for geo_types::Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}
