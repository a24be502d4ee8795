//! Nested enumeration of the candidate space.
//!
//! Order is fixed: latitude ascending, then separators in configured order,
//! then longitude ascending. The first candidate in that order whose digest
//! matches is the one reported, in both the sequential and the parallel run.

use crate::api::config::SearchConfig;
use crate::core::token::TokenFormat;
use crate::geom::filter::{GeoFilter, LatticeBounds};
use crate::geom::region::Region;
use crate::search::candidate::{SeparatorSet, assemble_into};
use crate::search::digest::DigestMatcher;
use crate::search::outcome::{Match, SearchOutcome};
use crate::util::error::SeekError;
use rayon::prelude::*;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

const PROGRESS_ROWS: u64 = 10_000;

/// One candidate as seen by a visitor of [`Searcher::for_each_candidate`].
#[derive(Debug, Clone, Copy)]
pub struct CandidateRef<'a> {
    pub lat_q: i64,
    pub lon_q: i64,
    pub separator_index: usize,
    pub bytes: &'a [u8],
}

/// Longitude entry of the inner-loop reuse table.
#[derive(Debug, Clone)]
struct LonEntry {
    q: i64,
    token: Box<[u8]>,
    x: f64,
}

/// Per-worker buffers reused across rows.
#[derive(Debug, Default)]
struct RowScratch {
    lat_token: Vec<u8>,
    candidate: Vec<u8>,
    accepted: Vec<usize>,
}

/// Position of a hit, resolved into a [`Match`] once the run is over.
#[derive(Debug)]
struct Hit {
    candidate: Vec<u8>,
    lat_q: i64,
    lon_q: i64,
    separator_index: usize,
    attempts: u64,
}

/// Search driver for a single [`SearchConfig`].
///
/// Construction resolves the region into lattice ranges and formats every
/// longitude token once; a token that does not fit the layout fails here,
/// before any candidate is hashed.
///
/// # Example
/// ```
/// use coordseek::{SearchConfig, Searcher, TargetDigest};
///
/// # fn main() -> Result<(), coordseek::SeekError> {
/// let config = SearchConfig::builder()
///     .target(TargetDigest::of(b"060.00001,024.40001"))
///     .bounding_box(60.0, 60.00002, 24.4, 24.40002)
///     .separators([","])
///     .build()?;
///
/// let outcome = Searcher::new(config)?.run()?;
/// assert_eq!(outcome.as_match().map(|m| m.attempts()), Some(5));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Searcher {
    config: SearchConfig,
    filter: GeoFilter,
    matcher: DigestMatcher,
    lon_table: Vec<LonEntry>,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Result<Self, SeekError> {
        config.region().validate()?;

        if let Region::Circle(c) = config.region() {
            if c.exceeds_approximation_limit() {
                warn!(
                    radius_m = c.radius_m,
                    "radius is beyond the equirectangular approximation limit; distances are approximate"
                );
            }
        }

        let format = *config.format();
        let filter = GeoFilter::new(config.region(), format.resolution());
        let bounds = filter.lattice_bounds().clone();

        // The widest latitude tokens sit at the ends of the range.
        format.format(*bounds.lat.start())?;
        format.format(*bounds.lat.end())?;

        let lon_table = build_lon_table(&bounds, &format, &filter)?;
        debug!(
            entries = lon_table.len(),
            width = format.width(),
            "longitude token table built"
        );

        Ok(Self {
            matcher: DigestMatcher::new(*config.target()),
            config,
            filter,
            lon_table,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn lattice_bounds(&self) -> &LatticeBounds {
        self.filter.lattice_bounds()
    }

    /// Covering box size times separator count; an upper bound on attempts.
    pub fn candidate_space(&self) -> u64 {
        self.lattice_bounds()
            .points()
            .saturating_mul(self.separators().len() as u64)
    }

    fn separators(&self) -> &SeparatorSet {
        self.config.separators()
    }

    fn format(&self) -> &TokenFormat {
        self.config.format()
    }

    /// Single-threaded search. Stops at the first match.
    pub fn run(&self) -> Result<SearchOutcome, SeekError> {
        self.log_start("sequential");
        let started = Instant::now();
        let mut scratch = RowScratch::default();
        let mut attempts = 0u64;
        let mut hit = None;

        for (row, lat_q) in self.lattice_bounds().lat.clone().enumerate() {
            let flow = self.scan_row(lat_q, &mut scratch, &mut |c: CandidateRef<'_>| {
                attempts += 1;
                if self.matcher.matches(c.bytes) {
                    ControlFlow::Break(self.hit(c, attempts))
                } else {
                    ControlFlow::Continue(())
                }
            })?;

            if let ControlFlow::Break(found) = flow {
                hit = Some(found);
                break;
            }
            if (row as u64 + 1) % PROGRESS_ROWS == 0 {
                debug!(rows = row + 1, attempts, "progress");
            }
        }

        Ok(self.finish(hit, attempts, started))
    }

    /// Search with latitude rows spread over a rayon pool.
    ///
    /// Reports the same match as [`Searcher::run`]. The attempt count is the
    /// total hashed by all workers, including rows that were still in flight
    /// when the match was found, so it is never below the sequential count.
    pub fn run_parallel(&self) -> Result<SearchOutcome, SeekError> {
        match self.config.threads() {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| SeekError::ConfigError(e.to_string()))?;
                pool.install(|| self.run_sharded())
            }
            None => self.run_sharded(),
        }
    }

    fn run_sharded(&self) -> Result<SearchOutcome, SeekError> {
        self.log_start("parallel");
        let started = Instant::now();
        let attempts = AtomicU64::new(0);
        let rows_done = AtomicU64::new(0);

        let mut found = self
            .lattice_bounds()
            .lat
            .clone()
            .into_par_iter()
            .map_init(RowScratch::default, |scratch, lat_q| {
                let mut row_attempts = 0u64;
                let flow = self.scan_row(lat_q, scratch, &mut |c: CandidateRef<'_>| {
                    row_attempts += 1;
                    if self.matcher.matches(c.bytes) {
                        ControlFlow::Break(self.hit(c, row_attempts))
                    } else {
                        ControlFlow::Continue(())
                    }
                });
                let before = attempts.fetch_add(row_attempts, Ordering::Relaxed);

                let rows = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                if rows % PROGRESS_ROWS == 0 {
                    debug!(rows, attempts = before + row_attempts, "progress");
                }

                match flow {
                    Ok(ControlFlow::Break(hit)) => Some(Ok(hit)),
                    Ok(ControlFlow::Continue(())) => None,
                    Err(e) => Some(Err(e)),
                }
            })
            .find_map_first(|result| result)
            .transpose()?;

        // every row before the match has been scanned to completion by now
        let total = attempts.load(Ordering::Relaxed);
        if let Some(hit) = found.as_mut() {
            hit.attempts = total;
        }
        Ok(self.finish(found, total, started))
    }

    /// Visits every candidate that passes the region filter, in search order,
    /// without hashing. Returns the number of candidates visited.
    pub fn for_each_candidate<F>(&self, mut visit: F) -> Result<u64, SeekError>
    where
        F: FnMut(CandidateRef<'_>) -> ControlFlow<()>,
    {
        let mut scratch = RowScratch::default();
        let mut visited = 0u64;
        for lat_q in self.lattice_bounds().lat.clone() {
            let flow = self.scan_row(lat_q, &mut scratch, &mut |c: CandidateRef<'_>| {
                visited += 1;
                visit(c)
            })?;
            if flow.is_break() {
                break;
            }
        }
        Ok(visited)
    }

    /// Exact number of candidates a full run would hash.
    pub fn count_candidates(&self) -> Result<u64, SeekError> {
        self.for_each_candidate(|_| ControlFlow::Continue(()))
    }

    fn scan_row<B, F>(
        &self,
        lat_q: i64,
        scratch: &mut RowScratch,
        visit: &mut F,
    ) -> Result<ControlFlow<B>, SeekError>
    where
        F: FnMut(CandidateRef<'_>) -> ControlFlow<B>,
    {
        let Some(y) = self.filter.row_offset(lat_q) else {
            return Ok(ControlFlow::Continue(()));
        };

        scratch.lat_token.clear();
        self.format().format_into(lat_q, &mut scratch.lat_token)?;

        scratch.accepted.clear();
        if self.filter.tests_points() {
            scratch.accepted.extend(
                self.lon_table
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| self.filter.accepts(y, entry.x))
                    .map(|(i, _)| i),
            );
        } else {
            scratch.accepted.extend(0..self.lon_table.len());
        }
        if scratch.accepted.is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        for (separator_index, sep) in self.separators().iter().enumerate() {
            for &i in &scratch.accepted {
                let entry = &self.lon_table[i];
                assemble_into(&mut scratch.candidate, &scratch.lat_token, sep, &entry.token);
                let flow = visit(CandidateRef {
                    lat_q,
                    lon_q: entry.q,
                    separator_index,
                    bytes: &scratch.candidate,
                });
                if flow.is_break() {
                    return Ok(flow);
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn hit(&self, c: CandidateRef<'_>, attempts: u64) -> Hit {
        Hit {
            candidate: c.bytes.to_vec(),
            lat_q: c.lat_q,
            lon_q: c.lon_q,
            separator_index: c.separator_index,
            attempts,
        }
    }

    fn finish(&self, hit: Option<Hit>, attempts: u64, started: Instant) -> SearchOutcome {
        let elapsed = started.elapsed();
        match hit {
            Some(hit) => {
                let resolution = self.config.resolution();
                let m = Match {
                    separator: self
                        .separators()
                        .get(hit.separator_index)
                        .map(<[u8]>::to_vec)
                        .unwrap_or_default(),
                    latitude: resolution.dequantize(hit.lat_q),
                    longitude: resolution.dequantize(hit.lon_q),
                    candidate: hit.candidate,
                    lat_q: hit.lat_q,
                    lon_q: hit.lon_q,
                    attempts: hit.attempts,
                    elapsed,
                };
                info!(
                    latitude = m.latitude,
                    longitude = m.longitude,
                    attempts = m.attempts,
                    ?elapsed,
                    "match found"
                );
                SearchOutcome::Matched(m)
            }
            None => {
                info!(attempts, ?elapsed, "search space exhausted");
                SearchOutcome::Exhausted { attempts, elapsed }
            }
        }
    }

    fn log_start(&self, mode: &str) {
        let bounds = self.lattice_bounds();
        info!(
            mode,
            target = %self.config.target(),
            rows = bounds.rows(),
            cols = bounds.cols(),
            separators = self.separators().len(),
            upper_bound = self.candidate_space(),
            "starting search"
        );
    }
}

fn build_lon_table(
    bounds: &LatticeBounds,
    format: &TokenFormat,
    filter: &GeoFilter,
) -> Result<Vec<LonEntry>, SeekError> {
    bounds
        .lon
        .clone()
        .map(|q| {
            Ok(LonEntry {
                q,
                token: format.format(q)?.into_boxed_slice(),
                x: filter.x_offset(q),
            })
        })
        .collect()
}
