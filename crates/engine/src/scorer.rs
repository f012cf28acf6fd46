//! Combined content score for every catalog row.
//!
//! ```text
//! score[i] = 0.25 * text_similarity(query, catalog[i])
//!          + 0.20 * keyword_similarity.row_max(i)
//!          + 0.25 * jaccard(genres)
//!          + 0.20 * jaccard(production_countries)
//!          + 0.10 * jaccard(spoken_languages)
//! ```

use crate::query::QueryMovie;
use crate::traits::TextSimilarity;
use catalog::{Catalog, RowIndex};
use rayon::prelude::*;
use serde::Serialize;
use similarity::{SimilarityMatrices, jaccard};
use tracing::{debug, instrument};

pub const TEXT_WEIGHT: f64 = 0.25;
pub const KEYWORD_WEIGHT: f64 = 0.20;
pub const GENRE_WEIGHT: f64 = 0.25;
pub const COUNTRY_WEIGHT: f64 = 0.20;
pub const LANGUAGE_WEIGHT: f64 = 0.10;

/// Unweighted score components for one catalog row
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub text: f64,
    pub keywords: f64,
    pub genres: f64,
    pub countries: f64,
    pub languages: f64,
}

impl ScoreBreakdown {
    /// Weighted sum of the components
    pub fn total(&self) -> f64 {
        TEXT_WEIGHT * self.text
            + KEYWORD_WEIGHT * self.keywords
            + GENRE_WEIGHT * self.genres
            + COUNTRY_WEIGHT * self.countries
            + LANGUAGE_WEIGHT * self.languages
    }
}

/// A catalog row with its combined score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub index: RowIndex,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores a query against every catalog row.
pub struct QueryScorer {
    text: Box<dyn TextSimilarity>,
    keyword_row_max: Vec<f64>,
}

impl QueryScorer {
    /// The keyword component doesn't depend on the query, so its row maxima
    /// are taken once here.
    pub fn new(text: Box<dyn TextSimilarity>, matrices: &SimilarityMatrices) -> Self {
        Self {
            text,
            keyword_row_max: matrices.keyword_similarity().row_maxima(),
        }
    }

    pub fn text_strategy(&self) -> &str {
        self.text.name()
    }

    /// One `ScoredCandidate` per catalog row, in row order.
    #[instrument(skip_all, fields(strategy = self.text.name()))]
    pub fn score(&self, catalog: &Catalog, query: &QueryMovie) -> Vec<ScoredCandidate> {
        let text = self.text.similarities(query);

        let scored: Vec<ScoredCandidate> = catalog
            .entries()
            .par_iter()
            .enumerate()
            .map(|(index, entry)| {
                let breakdown = ScoreBreakdown {
                    text: text.get(index).copied().unwrap_or(0.0),
                    keywords: self.keyword_row_max.get(index).copied().unwrap_or(0.0),
                    genres: jaccard(&entry.genres, &query.genres),
                    countries: jaccard(&entry.production_countries, &query.production_countries),
                    languages: jaccard(&entry.spoken_languages, &query.spoken_languages),
                };
                ScoredCandidate {
                    index,
                    score: breakdown.total(),
                    breakdown,
                }
            })
            .collect();

        debug!("Scored {} catalog rows", scored.len());
        scored
    }
}
