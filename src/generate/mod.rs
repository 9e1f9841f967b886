//! Candidate generation: combinatorial builder plus the AI merge step

mod candidates;
mod combinator;

pub use candidates::{sanitize_suggestion, CandidateLimit, CandidateSet, MergeStats};
pub use combinator::{CombinationRules, Combinator};
