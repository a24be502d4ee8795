use geo_types::Point;

/// Trait for types that can provide a WGS84 position in decimal degrees.
///
/// Implemented for `(lon, lat)` tuples and `geo_types::Point<f64>` (x = lon, y = lat),
/// so region constructors accept either.
pub trait Coordinate {
    fn lon(&self) -> f64;
    fn lat(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lon(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn lon(&self) -> f64 {
        self.x()
    }
    fn lat(&self) -> f64 {
        self.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (24.94, 60.17);
        assert_eq!(tuple.lon(), 24.94);
        assert_eq!(tuple.lat(), 60.17);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let pt = point! { x: 24.94, y: 60.17 };
        assert_eq!(pt.lon(), 24.94);
        assert_eq!(pt.lat(), 60.17);
    }
}
