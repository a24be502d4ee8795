pub mod constants;
pub mod quantize;
pub mod token;

pub use constants::{
    DEFAULT_INTEGER_DIGITS, DEFAULT_PRECISION, DEFAULT_SEPARATORS, DEFAULT_TARGET,
    EARTH_MEAN_RADIUS_M, EQUIRECTANGULAR_LIMIT_M, MAX_PRECISION,
};
pub use quantize::Resolution;
pub use token::TokenFormat;
