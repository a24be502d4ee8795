use crate::core::quantize::Resolution;
use crate::geom::region::{Circle, Region};
use std::ops::RangeInclusive;

/// Quantized latitude and longitude ranges that cover a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeBounds {
    pub lat: RangeInclusive<i64>,
    pub lon: RangeInclusive<i64>,
}

impl LatticeBounds {
    pub fn rows(&self) -> u64 {
        span(&self.lat)
    }

    pub fn cols(&self) -> u64 {
        span(&self.lon)
    }

    /// Number of lattice points in the covering box.
    pub fn points(&self) -> u64 {
        self.rows().saturating_mul(self.cols())
    }
}

fn span(range: &RangeInclusive<i64>) -> u64 {
    if range.is_empty() {
        0
    } else {
        range.end().abs_diff(*range.start()) + 1
    }
}

/// Decides which lattice points belong to the search region.
///
/// Work is split so that the driver can reject a whole latitude row before
/// looking at any longitude: [`GeoFilter::row_offset`] returns `None` for rows
/// that cannot contain an accepted point, and [`GeoFilter::accepts`] finishes the
/// test per point from precomputed planar offsets.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoFilter {
    Box(LatticeBounds),
    Circle(CircleFilter),
}

/// Equirectangular projection around the circle center.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleFilter {
    bounds: LatticeBounds,
    resolution: Resolution,
    center_lat: f64,
    center_lon: f64,
    lat_meters_per_degree: f64,
    lon_meters_per_degree: f64,
    radius_m: f64,
    radius_sq: f64,
}

impl CircleFilter {
    fn new(circle: &Circle, resolution: Resolution) -> Self {
        let b = circle.bounds();
        let bounds = LatticeBounds {
            lat: resolution.quantize_range_outward(b.lat_min, b.lat_max),
            lon: resolution.quantize_range_outward(b.lon_min, b.lon_max),
        };
        Self {
            bounds,
            resolution,
            center_lat: circle.center_lat,
            center_lon: circle.center_lon,
            lat_meters_per_degree: circle.meters_per_degree_lat(),
            lon_meters_per_degree: circle.meters_per_degree_lon(),
            radius_m: circle.radius_m,
            radius_sq: circle.radius_m * circle.radius_m,
        }
    }

    /// North/south offset from the center in meters.
    #[inline]
    pub fn y(&self, lat_q: i64) -> f64 {
        (self.resolution.dequantize(lat_q) - self.center_lat) * self.lat_meters_per_degree
    }

    /// East/west offset from the center in meters.
    #[inline]
    pub fn x(&self, lon_q: i64) -> f64 {
        (self.resolution.dequantize(lon_q) - self.center_lon) * self.lon_meters_per_degree
    }

    #[inline]
    fn within(&self, y: f64, x: f64) -> bool {
        x * x + y * y <= self.radius_sq
    }
}

impl GeoFilter {
    pub fn new(region: &Region, resolution: Resolution) -> Self {
        match region {
            Region::Box(b) => GeoFilter::Box(LatticeBounds {
                lat: resolution.quantize_range(b.lat_min, b.lat_max),
                lon: resolution.quantize_range(b.lon_min, b.lon_max),
            }),
            Region::Circle(c) => GeoFilter::Circle(CircleFilter::new(c, resolution)),
        }
    }

    /// Lattice ranges the driver enumerates.
    pub fn lattice_bounds(&self) -> &LatticeBounds {
        match self {
            GeoFilter::Box(bounds) => bounds,
            GeoFilter::Circle(c) => &c.bounds,
        }
    }

    /// Whether [`GeoFilter::accepts`] can reject anything inside an accepted row.
    pub fn tests_points(&self) -> bool {
        matches!(self, GeoFilter::Circle(_))
    }

    /// Per-longitude value cached in the inner loop table.
    #[inline]
    pub fn x_offset(&self, lon_q: i64) -> f64 {
        match self {
            GeoFilter::Box(_) => 0.0,
            GeoFilter::Circle(c) => c.x(lon_q),
        }
    }

    /// Row-level pruning. `None` means no point of this latitude row can pass.
    #[inline]
    pub fn row_offset(&self, lat_q: i64) -> Option<f64> {
        match self {
            GeoFilter::Box(bounds) => bounds.lat.contains(&lat_q).then_some(0.0),
            GeoFilter::Circle(c) => {
                let y = c.y(lat_q);
                (y.abs() <= c.radius_m).then_some(y)
            }
        }
    }

    /// Point-level test from a row offset and a longitude offset.
    #[inline]
    pub fn accepts(&self, y: f64, x: f64) -> bool {
        match self {
            GeoFilter::Box(_) => true,
            GeoFilter::Circle(c) => c.within(y, x),
        }
    }

    /// Direct point test without row pruning.
    pub fn contains(&self, lat_q: i64, lon_q: i64) -> bool {
        match self {
            GeoFilter::Box(bounds) => bounds.lat.contains(&lat_q) && bounds.lon.contains(&lon_q),
            GeoFilter::Circle(c) => c.within(c.y(lat_q), c.x(lon_q)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::region::BoundingBox;
    use crate::util::error::SeekError;

    fn circle_filter(radius_m: f64) -> Result<GeoFilter, SeekError> {
        let circle = Circle::new(60.17, 24.94, radius_m)?;
        Ok(GeoFilter::new(&Region::Circle(circle), Resolution::default()))
    }

    #[test]
    fn test_box_bounds_are_inclusive() -> Result<(), SeekError> {
        let region = Region::Box(BoundingBox::new(60.0, 60.00002, 24.4, 24.40002)?);
        let filter = GeoFilter::new(&region, Resolution::default());
        let bounds = filter.lattice_bounds();
        assert_eq!(bounds.rows(), 3);
        assert_eq!(bounds.cols(), 3);
        assert_eq!(bounds.points(), 9);
        assert!(!filter.tests_points());
        Ok(())
    }

    #[test]
    fn test_box_row_pruning() -> Result<(), SeekError> {
        let region = Region::Box(BoundingBox::new(60.0, 60.00002, 24.4, 24.40002)?);
        let filter = GeoFilter::new(&region, Resolution::default());
        assert_eq!(filter.row_offset(6_000_001), Some(0.0));
        assert_eq!(filter.row_offset(6_000_003), None);
        assert!(filter.contains(6_000_002, 2_440_000));
        assert!(!filter.contains(6_000_002, 2_440_003));
        Ok(())
    }

    #[test]
    fn test_center_always_passes() -> Result<(), SeekError> {
        let filter = circle_filter(1.0)?;
        assert!(filter.contains(6_017_000, 2_494_000));
        let y = filter.row_offset(6_017_000);
        assert_eq!(y, Some(0.0));
        assert!(filter.accepts(0.0, filter.x_offset(2_494_000)));
        Ok(())
    }

    #[test]
    fn test_radius_boundary() -> Result<(), SeekError> {
        let probe = circle_filter(1_000.0)?;
        // 500 lattice steps north of the center
        let lat_q = 6_017_500;
        let distance = match &probe {
            GeoFilter::Circle(c) => c.y(lat_q),
            GeoFilter::Box(_) => unreachable!(),
        };
        let eps = 1e-6;

        let inside = circle_filter(distance + eps)?;
        assert!(inside.contains(lat_q, 2_494_000));
        assert!(inside.row_offset(lat_q).is_some());

        let outside = circle_filter(distance - eps)?;
        assert!(!outside.contains(lat_q, 2_494_000));
        assert!(outside.row_offset(lat_q).is_none());
        Ok(())
    }

    #[test]
    fn test_circle_bounds_cover_circle() -> Result<(), SeekError> {
        let filter = circle_filter(300.0)?;
        let bounds = filter.lattice_bounds().clone();
        for lat_q in bounds.lat.clone().step_by(7) {
            for lon_q in bounds.lon.clone().step_by(7) {
                if filter.contains(lat_q, lon_q) {
                    assert!(filter.row_offset(lat_q).is_some());
                }
            }
        }
        // nothing just outside the lattice box is inside the circle
        let above = *bounds.lat.end() + 1;
        assert!(!filter.contains(above, 2_494_000));
        Ok(())
    }

    #[test]
    fn test_circle_prunes_about_a_quarter() -> Result<(), SeekError> {
        let filter = circle_filter(200.0)?;
        let bounds = filter.lattice_bounds();
        let mut accepted = 0u64;
        for lat_q in bounds.lat.clone() {
            for lon_q in bounds.lon.clone() {
                if filter.contains(lat_q, lon_q) {
                    accepted += 1;
                }
            }
        }
        let ratio = accepted as f64 / bounds.points() as f64;
        assert!((ratio - std::f64::consts::FRAC_PI_4).abs() < 0.05, "ratio {}", ratio);
        Ok(())
    }
}
