use crate::core::constants::{DEFAULT_INTEGER_DIGITS, DEFAULT_PRECISION};
use crate::core::quantize::Resolution;
use crate::core::token::TokenFormat;
use crate::geom::region::{BoundingBox, Circle, Region};
use crate::search::candidate::SeparatorSet;
use crate::search::digest::TargetDigest;
use crate::util::error::SeekError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Immutable parameters of one search.
///
/// Only obtainable through [`SearchConfigBuilder::build`], which validates
/// everything up front, so a `SearchConfig` is always searchable.
///
/// # Example
/// ```
/// use coordseek::SearchConfig;
///
/// # fn main() -> Result<(), coordseek::SeekError> {
/// let config = SearchConfig::builder()
///     .target_hex("5d4e47e73691204866cc73eaf837ec21249437eccca9caf21e23a774482993f6")
///     .bounding_box(60.0, 60.4, 24.4, 25.3)
///     .separators([",", " "])
///     .build()?;
/// assert_eq!(config.separators().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    target: TargetDigest,
    region: Region,
    format: TokenFormat,
    separators: SeparatorSet,
    threads: Option<usize>,
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    pub fn target(&self) -> &TargetDigest {
        &self.target
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn format(&self) -> &TokenFormat {
        &self.format
    }

    pub fn resolution(&self) -> Resolution {
        self.format.resolution()
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    /// Worker threads for parallel runs; `None` means the global rayon pool.
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target: TargetDigest::default(),
            region: Region::default(),
            format: TokenFormat::default(),
            separators: SeparatorSet::default(),
            threads: None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct SearchConfigBuilder {
    target: Option<TargetDigest>,
    target_hex: Option<String>,
    region: Option<Region>,
    precision: Option<u32>,
    integer_digits: Option<usize>,
    separators: Option<Vec<Vec<u8>>>,
    threads: Option<usize>,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: TargetDigest) -> Self {
        self.target = Some(target);
        self.target_hex = None;
        self
    }

    /// Hex target, decoded when the config is built.
    pub fn target_hex(mut self, hex: impl Into<String>) -> Self {
        self.target_hex = Some(hex.into());
        self.target = None;
        self
    }

    pub fn region(mut self, region: impl Into<Region>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn bounding_box(mut self, lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        self.region = Some(Region::Box(BoundingBox {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }));
        self
    }

    pub fn circle(mut self, center_lat: f64, center_lon: f64, radius_m: f64) -> Self {
        self.region = Some(Region::Circle(Circle {
            center_lat,
            center_lon,
            radius_m,
        }));
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn integer_digits(mut self, digits: usize) -> Self {
        self.integer_digits = Some(digits);
        self
    }

    pub fn separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        self.separators = Some(separators.into_iter().map(Into::into).collect());
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn build(self) -> Result<SearchConfig, SeekError> {
        let target = match (self.target, self.target_hex) {
            (Some(target), _) => target,
            (None, Some(hex)) => TargetDigest::from_hex(&hex)?,
            (None, None) => TargetDigest::default(),
        };

        let region = self.region.unwrap_or_default();
        region.validate()?;

        let resolution = Resolution::new(self.precision.unwrap_or(DEFAULT_PRECISION))?;
        let format = TokenFormat::new(
            self.integer_digits.unwrap_or(DEFAULT_INTEGER_DIGITS),
            resolution,
        )?;

        let separators = match self.separators {
            Some(seps) => SeparatorSet::new(seps)?,
            None => SeparatorSet::default(),
        };

        if self.threads == Some(0) {
            return Err(SeekError::ConfigError(
                "threads must be at least 1".to_string(),
            ));
        }

        Ok(SearchConfig {
            target,
            region,
            format,
            separators,
            threads: self.threads,
        })
    }
}

/// JSON config file; every field is optional.
///
/// ```json
/// {
///   "target": "5d4e47e7...",
///   "region": {"circle": {"center_lat": 60.17, "center_lon": 24.94, "radius_m": 500.0}},
///   "precision": 5,
///   "integer_digits": 3,
///   "separators": [",", " ", ";", "\n"],
///   "threads": 8
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub target: Option<String>,
    pub region: Option<Region>,
    pub precision: Option<u32>,
    pub integer_digits: Option<usize>,
    pub separators: Option<Vec<String>>,
    pub threads: Option<usize>,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeekError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            SeekError::IoError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SeekError::ConfigError(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self, SeekError> {
        serde_json::from_str(s).map_err(|e| SeekError::ConfigError(e.to_string()))
    }

    /// Layers the values present in the file over `builder`.
    pub fn apply(self, mut builder: SearchConfigBuilder) -> SearchConfigBuilder {
        if let Some(target) = self.target {
            builder = builder.target_hex(target);
        }
        if let Some(region) = self.region {
            builder = builder.region(region);
        }
        if let Some(precision) = self.precision {
            builder = builder.precision(precision);
        }
        if let Some(digits) = self.integer_digits {
            builder = builder.integer_digits(digits);
        }
        if let Some(separators) = self.separators {
            builder = builder.separators(separators);
        }
        if let Some(threads) = self.threads {
            builder = builder.threads(threads);
        }
        builder
    }
}

/// Decodes `\n`, `\r`, `\t`, `\0` and `\\` in a separator given on the command line.
///
/// Unknown escapes are kept verbatim.
pub fn decode_escapes(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut bytes = s.bytes();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'n') => out.push(b'\n'),
            Some(b'r') => out.push(b'\r'),
            Some(b't') => out.push(b'\t'),
            Some(b'0') => out.push(0),
            Some(b'\\') => out.push(b'\\'),
            Some(other) => {
                out.push(b'\\');
                out.push(other);
            }
            None => out.push(b'\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_builder_defaults() -> Result<(), SeekError> {
        let config = SearchConfig::builder().build()?;
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.format().width(), 9);
        assert_eq!(config.separators().len(), 4);
        Ok(())
    }

    #[test]
    fn test_builder_rejects_bad_region() {
        let result = SearchConfig::builder()
            .bounding_box(60.4, 60.0, 24.4, 25.3)
            .build();
        assert!(matches!(result, Err(SeekError::InvalidRegion(_))));

        let result = SearchConfig::builder().circle(60.0, 24.0, 0.0).build();
        assert!(matches!(result, Err(SeekError::InvalidRegion(_))));
    }

    #[test]
    fn test_builder_rejects_bad_parameters() {
        let result = SearchConfig::builder().precision(0).build();
        assert_eq!(result, Err(SeekError::InvalidResolution(0)));

        let empty: Vec<&str> = Vec::new();
        let result = SearchConfig::builder().separators(empty).build();
        assert_eq!(result, Err(SeekError::EmptySeparators));

        let result = SearchConfig::builder().target_hex("beef").build();
        assert!(matches!(result, Err(SeekError::InvalidTarget(_))));

        let result = SearchConfig::builder().threads(0).build();
        assert!(matches!(result, Err(SeekError::ConfigError(_))));
    }

    #[test]
    fn test_config_file_overrides() -> Result<(), SeekError> {
        let file = ConfigFile::from_json_str(
            r#"{
                "region": {"circle": {"center_lat": 60.17, "center_lon": 24.94, "radius_m": 250.0}},
                "separators": [",", "\n"],
                "threads": 2
            }"#,
        )?;
        let config = file.apply(SearchConfig::builder().precision(4)).build()?;
        assert!(matches!(config.region(), Region::Circle(_)));
        assert_eq!(config.resolution().precision(), 4);
        assert_eq!(config.separators().get(1), Some(&b"\n"[..]));
        assert_eq!(config.threads(), Some(2));
        Ok(())
    }

    #[test]
    fn test_config_file_unknown_field() {
        let result = ConfigFile::from_json_str(r#"{"radius": 5}"#);
        assert!(matches!(result, Err(SeekError::ConfigError(_))));
    }

    #[test]
    fn test_load_from_disk() -> Result<(), SeekError> {
        let dir = tempdir().map_err(|e| SeekError::IoError(e.to_string()))?;
        let path = dir.path().join("search.json");

        let mut file = File::create(&path).map_err(|e| SeekError::IoError(e.to_string()))?;
        writeln!(
            file,
            r#"{{"target": "{}", "precision": 5}}"#,
            TargetDigest::of(b"abc").to_hex()
        )
        .map_err(|e| SeekError::IoError(e.to_string()))?;

        let config = ConfigFile::load(&path)?.apply(SearchConfig::builder()).build()?;
        assert_eq!(*config.target(), TargetDigest::of(b"abc"));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load("/nonexistent/coordseek.json");
        assert!(matches!(result, Err(SeekError::IoError(_))));
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(decode_escapes(r"\n"), b"\n");
        assert_eq!(decode_escapes(r", "), b", ");
        assert_eq!(decode_escapes(r"a\tb\\c"), b"a\tb\\c");
        assert_eq!(decode_escapes(r"\q"), b"\\q");
        assert_eq!(decode_escapes("\\"), b"\\");
    }
}
