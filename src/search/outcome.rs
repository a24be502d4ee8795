use std::fmt;
use std::time::Duration;

/// A candidate whose digest equals the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub(crate) candidate: Vec<u8>,
    pub(crate) separator: Vec<u8>,
    pub(crate) lat_q: i64,
    pub(crate) lon_q: i64,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) attempts: u64,
    pub(crate) elapsed: Duration,
}

impl Match {
    /// Exact bytes that were hashed.
    pub fn candidate(&self) -> &[u8] {
        &self.candidate
    }

    /// The candidate as text, when it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.candidate).ok()
    }

    pub fn separator(&self) -> &[u8] {
        &self.separator
    }

    /// Quantized `(lat, lon)` lattice position.
    pub fn lattice_point(&self) -> (i64, i64) {
        (self.lat_q, self.lon_q)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Candidates hashed up to and including this one.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Terminal result of one search run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Matched(Match),
    Exhausted { attempts: u64, elapsed: Duration },
}

impl SearchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, SearchOutcome::Matched(_))
    }

    pub fn as_match(&self) -> Option<&Match> {
        match self {
            SearchOutcome::Matched(m) => Some(m),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn attempts(&self) -> u64 {
        match self {
            SearchOutcome::Matched(m) => m.attempts,
            SearchOutcome::Exhausted { attempts, .. } => *attempts,
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            SearchOutcome::Matched(m) => m.elapsed,
            SearchOutcome::Exhausted { elapsed, .. } => *elapsed,
        }
    }

    /// Candidates per second over the whole run.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.attempts() as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Matched(m) => {
                writeln!(f, "=== MATCH FOUND ===")?;
                match m.text() {
                    Some(text) => writeln!(f, "Original string: {:?}", text)?,
                    None => writeln!(f, "Original bytes: {}", hex::encode(&m.candidate))?,
                }
                writeln!(f, "Coordinates: {}, {}", m.latitude, m.longitude)?;
                write!(
                    f,
                    "Attempts: {} in {:.3?} ({:.0} candidates/s)",
                    m.attempts,
                    m.elapsed,
                    self.rate()
                )
            }
            SearchOutcome::Exhausted { attempts, elapsed } => {
                writeln!(f, "No match found in the searched region.")?;
                write!(
                    f,
                    "Attempts: {} in {:.3?} ({:.0} candidates/s)",
                    attempts,
                    elapsed,
                    self.rate()
                )
            }
        }
    }
}
