//! Ranking and diversity-aware selection.
//!
//! ## Algorithm
//! 1. Sort candidates by score, highest first; equal scores keep catalog order
//! 2. Drop excluded rows (the query movie itself)
//! 3. Walk the ranking greedily, tracking the genres covered so far:
//!    - while fewer than `genre_threshold` distinct genres are covered,
//!      accept anything
//!    - after that, accept only candidates sharing a covered genre
//! 4. Stop after `top_n` acceptances
//!
//! The threshold compares the size of the covered genre set, not the number
//! of accepted movies.

use crate::scorer::ScoredCandidate;
use catalog::{Catalog, RowIndex};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Sort by score descending. The sort is stable, so ties stay in the order
/// they were given (catalog order for scorer output).
pub fn rank(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates
}

/// Remove every candidate whose row is in `excluded`
pub fn exclude_rows(
    candidates: Vec<ScoredCandidate>,
    excluded: &HashSet<RowIndex>,
) -> Vec<ScoredCandidate> {
    if excluded.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|c| !excluded.contains(&c.index))
        .collect()
}

/// Greedy top-N selection with a minimum genre coverage.
#[derive(Debug, Clone)]
pub struct DiversitySelector {
    genre_threshold: usize,
}

impl DiversitySelector {
    /// Selector with the default threshold of 4 genres
    pub fn new() -> Self {
        Self { genre_threshold: 4 }
    }

    /// Configure how many distinct genres must be covered before selection
    /// starts requiring genre overlap (default: 4)
    pub fn with_genre_threshold(mut self, threshold: usize) -> Self {
        self.genre_threshold = threshold;
        self
    }

    pub fn genre_threshold(&self) -> usize {
        self.genre_threshold
    }

    /// Select up to `top_n` candidates from an already ranked list.
    ///
    /// Candidates whose row is not in `catalog` are skipped.
    pub fn select(
        &self,
        ranked: &[ScoredCandidate],
        catalog: &Catalog,
        top_n: usize,
    ) -> Vec<ScoredCandidate> {
        let mut selected = Vec::with_capacity(top_n.min(ranked.len()));
        let mut genre_matched: BTreeSet<&str> = BTreeSet::new();

        for candidate in ranked {
            if selected.len() >= top_n {
                break;
            }
            let Some(entry) = catalog.get(candidate.index) else {
                continue;
            };

            let accept = genre_matched.len() < self.genre_threshold
                || entry.genres.iter().any(|g| genre_matched.contains(g.as_str()));

            if accept {
                genre_matched.extend(entry.genres.iter().map(String::as_str));
                selected.push(*candidate);
            }
        }

        debug!(
            "Selected {} of {} ranked candidates covering {} genres",
            selected.len(),
            ranked.len(),
            genre_matched.len()
        );
        selected
    }
}

impl Default for DiversitySelector {
    fn default() -> Self {
        Self::new()
    }
}
