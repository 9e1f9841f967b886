//! Ordered, deduplicating candidate container and the AI merge step

use crate::domain::validator::is_valid_base_name;
use crate::lexicon::WordSet;
use crate::types::{Candidate, CandidateSource};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Clean a raw provider string into a base name candidate
///
/// Lower-cases, drops anything from the first `.` on (providers often
/// append a TLD), keeps `[a-z0-9-]`, collapses hyphen runs and trims
/// hyphens from both ends. The result may still be invalid (too short).
pub fn sanitize_suggestion(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let label = lowered.split('.').next().unwrap_or_default();

    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if c == '-' && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Outcome counts of one AI merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub accepted: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

/// Candidates in first-seen order, unique by normalized base name
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
    seen: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless an equivalent name is already present; first one wins
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if self.seen.insert(candidate.normalized_key()) {
            self.candidates.push(candidate);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, base_name: &str) -> bool {
        self.seen.contains(&base_name.trim().to_lowercase())
    }

    /// Sanitize, validate and filter raw AI strings, then merge them
    ///
    /// Names already present keep their existing source, so a combined
    /// candidate is never relabelled as AI.
    pub fn merge_ai<S: AsRef<str>>(&mut self, raw: &[S], words: &WordSet) -> MergeStats {
        let mut stats = MergeStats::default();
        for item in raw {
            let name = sanitize_suggestion(item.as_ref());
            if !is_valid_base_name(&name) || !words.satisfies_compulsory(&name) {
                tracing::debug!(raw = %item.as_ref(), sanitized = %name, "Dropping AI suggestion");
                stats.rejected += 1;
                continue;
            }
            if self.insert(Candidate::ai(name, true)) {
                stats.accepted += 1;
            } else {
                stats.duplicates += 1;
            }
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn count_by_source(&self, source: CandidateSource) -> usize {
        self.candidates.iter().filter(|c| c.source == source).count()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl FromIterator<Candidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for candidate in iter {
            set.insert(candidate);
        }
        set
    }
}

/// Optional trimming of a large candidate list before verification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateLimit {
    /// Keep at most this many candidates
    pub max_candidates: Option<usize>,
    /// Shuffle with this seed before truncating
    pub shuffle_seed: Option<u64>,
}

impl CandidateLimit {
    pub fn apply(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        if let Some(seed) = self.shuffle_seed {
            let mut rng = StdRng::seed_from_u64(seed);
            candidates.shuffle(&mut rng);
        }
        if let Some(max) = self.max_candidates {
            candidates.truncate(max);
        }
        candidates
    }
}
