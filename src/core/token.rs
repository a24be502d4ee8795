use crate::core::constants::DEFAULT_INTEGER_DIGITS;
use crate::core::quantize::Resolution;
use crate::util::error::SeekError;

/// Layout of a fixed-width coordinate token.
///
/// A token is `integer_digits` characters of zero-padded integer part (a leading
/// `-` takes one of those characters), a `.`, then exactly `precision`
/// fractional digits. With the defaults, 6012345 renders as `060.12345`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenFormat {
    integer_digits: usize,
    resolution: Resolution,
}

impl TokenFormat {
    pub fn new(integer_digits: usize, resolution: Resolution) -> Result<Self, SeekError> {
        if integer_digits == 0 {
            return Err(SeekError::InvalidIntegerDigits(integer_digits));
        }
        Ok(Self {
            integer_digits,
            resolution,
        })
    }

    pub fn integer_digits(&self) -> usize {
        self.integer_digits
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Total token length in bytes.
    pub fn width(&self) -> usize {
        self.integer_digits + 1 + self.resolution.precision() as usize
    }

    /// Renders a quantized coordinate into a new buffer.
    pub fn format(&self, value: i64) -> Result<Vec<u8>, SeekError> {
        let mut out = Vec::with_capacity(self.width());
        self.format_into(value, &mut out)?;
        Ok(out)
    }

    /// Appends the token for `value` to `out`.
    ///
    /// Fails instead of truncating when the integer part does not fit.
    pub fn format_into(&self, value: i64, out: &mut Vec<u8>) -> Result<(), SeekError> {
        let negative = value < 0;
        let magnitude = value.unsigned_abs();
        let scale = self.resolution.scale() as u64;
        let int_part = magnitude / scale;
        let frac_part = magnitude % scale;

        let available = self.integer_digits - usize::from(negative);
        if decimal_len(int_part) > available {
            return Err(SeekError::FormatOverflow {
                value,
                integer_digits: self.integer_digits,
            });
        }

        if negative {
            out.push(b'-');
        }
        push_padded(out, int_part, available);
        out.push(b'.');
        push_padded(out, frac_part, self.resolution.precision() as usize);
        Ok(())
    }

    /// Reads a token back into its quantized value.
    pub fn parse(&self, token: &[u8]) -> Result<i64, SeekError> {
        let malformed = || SeekError::MalformedToken(String::from_utf8_lossy(token).into_owned());

        if token.len() != self.width() || token[self.integer_digits] != b'.' {
            return Err(malformed());
        }

        let (int_field, negative) = match token[0] {
            b'-' => (&token[1..self.integer_digits], true),
            _ => (&token[..self.integer_digits], false),
        };
        let frac_field = &token[self.integer_digits + 1..];

        let int_part = parse_digits(int_field).ok_or_else(malformed)?;
        let frac_part = parse_digits(frac_field).ok_or_else(malformed)?;

        let magnitude = int_part
            .checked_mul(self.resolution.scale())
            .and_then(|v| v.checked_add(frac_part))
            .ok_or_else(malformed)?;

        Ok(if negative { -magnitude } else { magnitude })
    }
}

impl Default for TokenFormat {
    fn default() -> Self {
        Self {
            integer_digits: DEFAULT_INTEGER_DIGITS,
            resolution: Resolution::default(),
        }
    }
}

fn decimal_len(mut v: u64) -> usize {
    let mut len = 1;
    while v >= 10 {
        v /= 10;
        len += 1;
    }
    len
}

/// Writes `v` right-aligned in a zero-filled field of `width` bytes.
/// The caller guarantees `v` fits.
fn push_padded(out: &mut Vec<u8>, mut v: u64, width: usize) {
    let start = out.len();
    out.resize(start + width, b'0');
    let mut i = start + width;
    while v > 0 && i > start {
        i -= 1;
        out[i] = b'0' + (v % 10) as u8;
        v /= 10;
    }
}

fn parse_digits(field: &[u8]) -> Option<i64> {
    if field.is_empty() {
        return None;
    }
    field.iter().try_fold(0_i64, |acc, &b| {
        if b.is_ascii_digit() {
            acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
        } else {
            None
        }
    })
}
