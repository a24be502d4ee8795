//! # coordseek
//!
//! Finds the coordinate string whose SHA-256 digest equals a known value by
//! walking every lattice point of a region, rendered as fixed-width decimal
//! degrees (`060.12345`) and joined by each configured separator.
//!
//! ### 1. `SearchConfig` - What to Search
//!
//! ```
//! use coordseek::SearchConfig;
//!
//! # fn main() -> Result<(), coordseek::SeekError> {
//! let config = SearchConfig::builder()
//!     .target_hex("5d4e47e73691204866cc73eaf837ec21249437eccca9caf21e23a774482993f6")
//!     .circle(60.1699, 24.9384, 250.0)
//!     .precision(5)
//!     .separators([",", " ", ";", "\n"])
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Searcher` - Running It
//!
//! ```
//! use coordseek::{SearchConfig, SearchOutcome, Searcher, TargetDigest};
//!
//! # fn main() -> Result<(), coordseek::SeekError> {
//! let config = SearchConfig::builder()
//!     .target(TargetDigest::of(b"060.00002;024.40000"))
//!     .bounding_box(60.0, 60.00002, 24.4, 24.40002)
//!     .build()?;
//!
//! match Searcher::new(config)?.run_parallel()? {
//!     SearchOutcome::Matched(m) => println!("{:?}", m.text()),
//!     SearchOutcome::Exhausted { attempts, .. } => println!("nothing in {} attempts", attempts),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `ConfigFile` - Loading Parameters From JSON
//!
//! ```no_run
//! use coordseek::{ConfigFile, SearchConfig, Searcher};
//!
//! # fn main() -> Result<(), coordseek::SeekError> {
//! let config = ConfigFile::load("search.json")?
//!     .apply(SearchConfig::builder())
//!     .build()?;
//! let outcome = Searcher::new(config)?.run()?;
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! Circle regions use an equirectangular approximation around the center,
//! which is only accurate for radii up to a few tens of kilometers.

pub mod api;
pub mod core;
pub mod geom;
pub mod search;
pub mod util;

pub use api::{ConfigFile, SearchConfig, SearchConfigBuilder, decode_escapes};
pub use core::{
    DEFAULT_INTEGER_DIGITS, DEFAULT_PRECISION, DEFAULT_SEPARATORS, DEFAULT_TARGET,
    EARTH_MEAN_RADIUS_M, EQUIRECTANGULAR_LIMIT_M, MAX_PRECISION, Resolution, TokenFormat,
};
pub use geom::{BoundingBox, Circle, Coordinate, GeoFilter, LatticeBounds, Region};
pub use search::{
    CandidateRef, DigestMatcher, Match, SearchOutcome, Searcher, SeparatorSet, TargetDigest,
    assemble,
};
pub use util::{SeekError, init_logging};

pub use geo_types;
