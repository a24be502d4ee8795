pub mod candidate;
pub mod digest;
pub mod driver;
pub mod outcome;

pub use candidate::{SeparatorSet, assemble, assemble_into};
pub use digest::{DigestMatcher, TargetDigest};
pub use driver::{CandidateRef, Searcher};
pub use outcome::{Match, SearchOutcome};
