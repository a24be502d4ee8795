use thiserror::Error;

/// Error type for coordseek operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeekError {
    /// The search region is malformed (min > max, out of range, non-positive radius).
    #[error("Invalid region: {0}")]
    InvalidRegion(String),
    /// The fractional precision is zero or too large to scale into an `i64`.
    #[error("Invalid resolution: {0} fractional digits")]
    InvalidResolution(u32),
    /// The integer field of a token must be at least one character wide.
    #[error("Invalid integer digit count: {0}")]
    InvalidIntegerDigits(usize),
    /// No separators were configured.
    #[error("Separator set is empty")]
    EmptySeparators,
    /// The target digest could not be decoded.
    #[error("Invalid target digest: {0}")]
    InvalidTarget(String),
    /// A coordinate needs more integer digits than the token layout allows.
    #[error("Coordinate {value} does not fit in {integer_digits} integer digits")]
    FormatOverflow { value: i64, integer_digits: usize },
    /// A byte sequence is not a token of the configured layout.
    #[error("Malformed token: {0}")]
    MalformedToken(String),
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Config file could not be parsed.
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl SeekError {
    /// Whether this error is a configuration defect detected before enumeration.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            SeekError::FormatOverflow { .. } | SeekError::MalformedToken(_) | SeekError::IoError(_)
        )
    }
}
