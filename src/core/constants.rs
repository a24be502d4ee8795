/// Default number of fractional digits (lattice step 0.00001°)
pub const DEFAULT_PRECISION: u32 = 5;

/// Largest supported precision; 180 * 10^12 still fits comfortably in an `i64`
pub const MAX_PRECISION: u32 = 12;

/// Default integer field width of a token, sign included ("060.12345")
pub const DEFAULT_INTEGER_DIGITS: usize = 3;

/// Mean Earth radius in meters (IUGG)
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Radius above which the equirectangular approximation is no longer trusted
pub const EQUIRECTANGULAR_LIMIT_M: f64 = 50_000.0;

/// Separators tried between the latitude and longitude tokens, in order
pub const DEFAULT_SEPARATORS: [&str; 4] = [",", " ", ";", "\n"];

/// Helsinki + Espoo bounding box [lat_min, lat_max, lon_min, lon_max]
pub const DEFAULT_BOX: [f64; 4] = [60.00, 60.40, 24.40, 25.30];

/// SHA-256 digest the search was originally run against
pub const DEFAULT_TARGET: &str =
    "5d4e47e73691204866cc73eaf837ec21249437eccca9caf21e23a774482993f6";

/// Length of a SHA-256 digest in bytes
pub const DIGEST_LEN: usize = 32;

/// Valid latitude range in degrees
pub const LAT_RANGE: [f64; 2] = [-90.0, 90.0];

/// Valid longitude range in degrees
pub const LON_RANGE: [f64; 2] = [-180.0, 180.0];
