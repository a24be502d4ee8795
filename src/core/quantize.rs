use crate::core::constants::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::util::error::SeekError;
use std::ops::RangeInclusive;

/// Fixed fractional precision shared by latitude and longitude.
///
/// A quantized coordinate is the degree value multiplied by `10^precision` and
/// rounded to an integer; everything after quantization is integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    precision: u32,
    scale: i64,
}

impl Resolution {
    pub fn new(precision: u32) -> Result<Self, SeekError> {
        if precision == 0 || precision > MAX_PRECISION {
            return Err(SeekError::InvalidResolution(precision));
        }
        Ok(Self {
            precision,
            scale: 10_i64.pow(precision),
        })
    }

    /// Number of fractional digits.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// `10^precision`, the number of lattice steps per degree.
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Lattice step in degrees.
    pub fn step(&self) -> f64 {
        1.0 / self.scale as f64
    }

    /// Scales a degree value to the lattice, rounding half away from zero.
    #[inline]
    pub fn quantize(&self, degrees: f64) -> i64 {
        (degrees * self.scale as f64).round() as i64
    }

    #[inline]
    pub fn dequantize(&self, value: i64) -> f64 {
        value as f64 / self.scale as f64
    }

    /// Closed lattice range `[round(min·10^p), round(max·10^p)]`.
    ///
    /// The caller guarantees `min <= max`.
    pub fn quantize_range(&self, min: f64, max: f64) -> RangeInclusive<i64> {
        self.quantize(min)..=self.quantize(max)
    }

    /// Lattice range that is guaranteed to cover `[min, max]`, rounding outward.
    pub fn quantize_range_outward(&self, min: f64, max: f64) -> RangeInclusive<i64> {
        let scale = self.scale as f64;
        ((min * scale).floor() as i64)..=((max * scale).ceil() as i64)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            scale: 10_i64.pow(DEFAULT_PRECISION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        let res = Resolution::default();
        assert_eq!(res.precision(), 5);
        assert_eq!(res.scale(), 100_000);
        assert!((res.step() - 0.00001).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_precision() {
        assert_eq!(Resolution::new(0), Err(SeekError::InvalidResolution(0)));
        assert_eq!(Resolution::new(13), Err(SeekError::InvalidResolution(13)));
        assert!(Resolution::new(12).is_ok());
    }

    #[test]
    fn test_quantize_avoids_float_drift() -> Result<(), SeekError> {
        let res = Resolution::new(5)?;
        assert_eq!(res.quantize(60.00001), 6_000_001);
        assert_eq!(res.quantize(24.40002), 2_440_002);
        assert_eq!(res.quantize(60.15), 6_015_000);
        Ok(())
    }

    #[test]
    fn test_quantize_rounds_half_away_from_zero() -> Result<(), SeekError> {
        let res = Resolution::new(1)?;
        assert_eq!(res.quantize(0.25), 3);
        assert_eq!(res.quantize(-0.25), -3);
        assert_eq!(res.quantize(0.24), 2);
        Ok(())
    }

    #[test]
    fn test_quantize_range_is_inclusive() -> Result<(), SeekError> {
        let res = Resolution::new(5)?;
        let range = res.quantize_range(60.0, 60.00002);
        assert_eq!(range.clone().count(), 3);
        assert_eq!(*range.start(), 6_000_000);
        assert_eq!(*range.end(), 6_000_002);
        Ok(())
    }

    #[test]
    fn test_quantize_range_outward_covers_bounds() -> Result<(), SeekError> {
        let res = Resolution::new(5)?;
        let range = res.quantize_range_outward(60.000004, 60.000016);
        assert_eq!(*range.start(), 6_000_000);
        assert_eq!(*range.end(), 6_000_002);
        Ok(())
    }

    #[test]
    fn test_dequantize_roundtrip() -> Result<(), SeekError> {
        for precision in 1..=8 {
            let res = Resolution::new(precision)?;
            for q in [-17_999_999_i64, -1, 0, 1, 6_012_345, 17_999_999] {
                assert_eq!(res.quantize(res.dequantize(q)), q);
            }
        }
        Ok(())
    }
}
