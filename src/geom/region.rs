use crate::core::constants::{
    DEFAULT_BOX, EARTH_MEAN_RADIUS_M, EQUIRECTANGULAR_LIMIT_M, LAT_RANGE, LON_RANGE,
};
use crate::geom::coord::Coordinate;
use crate::util::error::SeekError;
use geo_types::Rect;
use serde::{Deserialize, Serialize};

/// Area of the lattice to search, in decimal degrees.
///
/// Deserializes from `{"box": {...}}` or `{"circle": {...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Box(BoundingBox),
    Circle(Circle),
}

impl Region {
    /// Checks the region invariants; values built by deserialization skip the constructors.
    pub fn validate(&self) -> Result<(), SeekError> {
        match self {
            Region::Box(b) => b.validate(),
            Region::Circle(c) => c.validate(),
        }
    }

    /// Smallest box in degrees that contains the region.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Region::Box(b) => *b,
            Region::Circle(c) => c.bounds(),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::Box(BoundingBox::default())
    }
}

impl From<BoundingBox> for Region {
    fn from(b: BoundingBox) -> Self {
        Region::Box(b)
    }
}

impl From<Circle> for Region {
    fn from(c: Circle) -> Self {
        Region::Circle(c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Result<Self, SeekError> {
        let b = Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        };
        b.validate()?;
        Ok(b)
    }

    /// Builds a box from a `geo_types::Rect` whose x axis is longitude.
    pub fn from_rect(rect: &Rect<f64>) -> Result<Self, SeekError> {
        Self::new(rect.min().y, rect.max().y, rect.min().x, rect.max().x)
    }

    pub fn validate(&self) -> Result<(), SeekError> {
        check_axis("latitude", self.lat_min, self.lat_max, LAT_RANGE)?;
        check_axis("longitude", self.lon_min, self.lon_max, LON_RANGE)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            lat_min: DEFAULT_BOX[0],
            lat_max: DEFAULT_BOX[1],
            lon_min: DEFAULT_BOX[2],
            lon_max: DEFAULT_BOX[3],
        }
    }
}

/// A circle on the ground, tested with an equirectangular (flat-plane) approximation.
///
/// The approximation is only trusted up to a few tens of kilometers; it is not a
/// geodesic distance. Circles that would cross the ±180° meridian are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_m: f64,
}

impl Circle {
    pub fn new(center_lat: f64, center_lon: f64, radius_m: f64) -> Result<Self, SeekError> {
        let c = Self {
            center_lat,
            center_lon,
            radius_m,
        };
        c.validate()?;
        Ok(c)
    }

    /// Builds a circle around a `(lon, lat)` tuple or `geo_types::Point`.
    pub fn from_center<C: Coordinate>(center: &C, radius_m: f64) -> Result<Self, SeekError> {
        Self::new(center.lat(), center.lon(), radius_m)
    }

    pub fn validate(&self) -> Result<(), SeekError> {
        check_axis("latitude", self.center_lat, self.center_lat, LAT_RANGE)?;
        check_axis("longitude", self.center_lon, self.center_lon, LON_RANGE)?;
        if !(self.radius_m.is_finite() && self.radius_m > 0.0) {
            return Err(SeekError::InvalidRegion(format!(
                "radius must be positive, got {}",
                self.radius_m
            )));
        }
        if let Some(dlon) = self.lon_half_span() {
            let (west, east) = (self.center_lon - dlon, self.center_lon + dlon);
            if west < LON_RANGE[0] || east > LON_RANGE[1] {
                return Err(SeekError::InvalidRegion(format!(
                    "circle spans longitude {:.6}..{:.6} and crosses the antimeridian",
                    west, east
                )));
            }
        }
        Ok(())
    }

    /// Half-width of the circle in degrees of longitude, or `None` when the
    /// circle reaches around a pole and covers every longitude.
    fn lon_half_span(&self) -> Option<f64> {
        let lon_scale = self.meters_per_degree_lon();
        if lon_scale <= f64::EPSILON {
            return None;
        }
        let dlon = self.radius_m / lon_scale;
        (dlon < 180.0).then_some(dlon)
    }

    /// Whether the radius is beyond what the flat-plane approximation handles well.
    pub fn exceeds_approximation_limit(&self) -> bool {
        self.radius_m > EQUIRECTANGULAR_LIMIT_M
    }

    /// Meters per degree of latitude.
    pub fn meters_per_degree_lat(&self) -> f64 {
        EARTH_MEAN_RADIUS_M.to_radians()
    }

    /// Meters per degree of longitude at the center latitude.
    pub fn meters_per_degree_lon(&self) -> f64 {
        self.meters_per_degree_lat() * self.center_lat.to_radians().cos()
    }

    /// Box of center ± radius converted to degrees, clamped to valid coordinates.
    pub fn bounds(&self) -> BoundingBox {
        let dlat = self.radius_m / self.meters_per_degree_lat();

        let (lon_min, lon_max) = match self.lon_half_span() {
            Some(dlon) => (
                (self.center_lon - dlon).max(LON_RANGE[0]),
                (self.center_lon + dlon).min(LON_RANGE[1]),
            ),
            None => (LON_RANGE[0], LON_RANGE[1]),
        };

        BoundingBox {
            lat_min: (self.center_lat - dlat).max(LAT_RANGE[0]),
            lat_max: (self.center_lat + dlat).min(LAT_RANGE[1]),
            lon_min,
            lon_max,
        }
    }
}

fn check_axis(name: &str, min: f64, max: f64, valid: [f64; 2]) -> Result<(), SeekError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(SeekError::InvalidRegion(format!("{} is not finite", name)));
    }
    if min > max {
        return Err(SeekError::InvalidRegion(format!(
            "{} min {} is greater than max {}",
            name, min, max
        )));
    }
    if min < valid[0] || max > valid[1] {
        return Err(SeekError::InvalidRegion(format!(
            "{} [{}, {}] is outside [{}, {}]",
            name, min, max, valid[0], valid[1]
        )));
    }
    Ok(())
}
