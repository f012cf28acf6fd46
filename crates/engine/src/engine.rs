//! # Scoring Engine
//!
//! Ties the pipeline together:
//! 1. Validate and normalize the query
//! 2. Score every catalog row
//! 3. Rank, drop the query movie itself
//! 4. Select the top N with the genre-diversity policy
//!
//! A `ScoringEngine` owns its catalog and every structure derived from it, and
//! nothing mutates them after `build`. Share it behind an `Arc` to serve
//! concurrent requests; to pick up a new catalog, build a new engine and swap
//! the `Arc`.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use catalog::{Catalog, DataError, MovieId, RawMovie, RowIndex};
use serde::Serialize;
use serde_json::Value;
use similarity::SimilarityMatrices;
use tracing::{debug, info, instrument, warn};

use crate::error::{InvalidInputError, Result};
use crate::query::QueryMovie;
use crate::ranker::{self, DiversitySelector};
use crate::scorer::{QueryScorer, ScoreBreakdown, ScoredCandidate};
use crate::text::{OverviewRowMax, QueryVectorSimilarity};
use crate::traits::TextSimilarity;

/// Default number of recommendations per request
pub const DEFAULT_TOP_N: usize = 8;

/// How the text component of the score is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStrategy {
    /// Project the query into a TF-IDF space over catalog feature text
    #[default]
    QueryVector,
    /// Row maximum of the overview similarity matrix
    OverviewRowMax,
}

/// Engine settings
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub default_top_n: usize,
    pub text_strategy: TextStrategy,
    pub genre_diversity_threshold: usize,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
            text_strategy: TextStrategy::default(),
            genre_diversity_threshold: 4,
        }
    }

    /// Configure the result size used by `recommend_default` (default: 8)
    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    /// Configure the text similarity strategy (default: `QueryVector`)
    pub fn with_text_strategy(mut self, strategy: TextStrategy) -> Self {
        self.text_strategy = strategy;
        self
    }

    /// Configure the genre coverage threshold (default: 4)
    pub fn with_genre_diversity_threshold(mut self, threshold: usize) -> Self {
        self.genre_diversity_threshold = threshold;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One selected movie with the score that put it there
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub index: RowIndex,
    pub id: MovieId,
    pub title: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Build an engine with the default configuration from raw catalog records.
///
/// Fails with `DataError` on an empty catalog or an unusable record.
pub fn build_index(records: Vec<RawMovie>) -> std::result::Result<ScoringEngine, DataError> {
    ScoringEngine::build(Catalog::from_records(records)?, EngineConfig::default())
}

/// Read-only recommendation engine over one catalog
pub struct ScoringEngine {
    catalog: Catalog,
    matrices: SimilarityMatrices,
    scorer: QueryScorer,
    selector: DiversitySelector,
    config: EngineConfig,
}

impl ScoringEngine {
    /// Build every index over `catalog`. This is the expensive step and runs
    /// once, before any request is served.
    #[instrument(skip_all, fields(entries = catalog.len()))]
    pub fn build(catalog: Catalog, config: EngineConfig) -> std::result::Result<Self, DataError> {
        let start = Instant::now();

        let matrices = SimilarityMatrices::build(&catalog)?;
        let text: Box<dyn TextSimilarity> = match config.text_strategy {
            TextStrategy::QueryVector => Box::new(QueryVectorSimilarity::fit(&catalog)),
            TextStrategy::OverviewRowMax => Box::new(OverviewRowMax::new(&matrices)),
        };
        let scorer = QueryScorer::new(text, &matrices);
        let selector =
            DiversitySelector::new().with_genre_threshold(config.genre_diversity_threshold);

        info!(
            "Scoring engine ready: {} movies, text strategy {}, built in {:.2?}",
            catalog.len(),
            scorer.text_strategy(),
            start.elapsed()
        );

        Ok(Self {
            catalog,
            matrices,
            scorer,
            selector,
            config,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matrices(&self) -> &SimilarityMatrices {
        &self.matrices
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommended movie ids for a JSON query.
    ///
    /// Never fails: a rejected query is logged and yields an empty list.
    pub fn recommend(&self, query: &Value, top_n: usize) -> Vec<MovieId> {
        match self.try_recommend(query, top_n) {
            Ok(ids) => ids,
            Err(err) => {
                log_rejected(&err);
                Vec::new()
            }
        }
    }

    /// `recommend` with the configured default size
    pub fn recommend_default(&self, query: &Value) -> Vec<MovieId> {
        self.recommend(query, self.config.default_top_n)
    }

    /// Like `recommend`, but reports why a query was rejected
    pub fn try_recommend(&self, query: &Value, top_n: usize) -> Result<Vec<MovieId>> {
        let recommendations = self.recommend_detailed(query, top_n)?;
        Ok(recommendations.into_iter().map(|r| r.id).collect())
    }

    /// Recommendations with scores and score components
    pub fn recommend_detailed(&self, query: &Value, top_n: usize) -> Result<Vec<Recommendation>> {
        let query = QueryMovie::from_value(query)?;
        self.recommend_for_movie(&query, top_n)
    }

    /// Recommendations for an already normalized query
    #[instrument(skip_all, fields(title = %query.title, top_n))]
    pub fn recommend_for_movie(&self, query: &QueryMovie, top_n: usize) -> Result<Vec<Recommendation>> {
        if !query.has_features() {
            return Err(InvalidInputError::NoFeatures);
        }

        let scored = self.scorer.score(&self.catalog, query);
        let excluded: HashSet<RowIndex> = self.self_match(query).into_iter().collect();
        Ok(self.select(scored, &excluded, top_n))
    }

    /// Recommended ids for several reference movies at once.
    ///
    /// Never fails; see `try_recommend_many`.
    pub fn recommend_many(&self, queries: &[Value], top_n: usize) -> Vec<MovieId> {
        match self.try_recommend_many(queries, top_n) {
            Ok(recommendations) => recommendations.into_iter().map(|r| r.id).collect(),
            Err(err) => {
                log_rejected(&err);
                Vec::new()
            }
        }
    }

    /// Parse each JSON query and hand the valid ones to `recommend_for_movies`.
    ///
    /// Rejected queries are logged and skipped. Fails only when no query is
    /// usable.
    pub fn try_recommend_many(&self, queries: &[Value], top_n: usize) -> Result<Vec<Recommendation>> {
        let parsed: Vec<QueryMovie> = queries
            .iter()
            .filter_map(|value| match QueryMovie::from_value(value) {
                Ok(query) => Some(query),
                Err(err) => {
                    log_rejected(&err);
                    None
                }
            })
            .collect();

        self.recommend_for_movies(&parsed, top_n)
            .map_err(|_| InvalidInputError::NoUsableQueries {
                count: queries.len(),
            })
    }

    /// Score each query that has features, keep every row's best score across
    /// queries, exclude every query's own catalog row, then rank and select
    /// as usual.
    #[instrument(skip_all, fields(queries = queries.len(), top_n))]
    pub fn recommend_for_movies(
        &self,
        queries: &[QueryMovie],
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        let mut runs = Vec::with_capacity(queries.len());
        let mut excluded = HashSet::new();

        for query in queries {
            if !query.has_features() {
                log_rejected(&InvalidInputError::NoFeatures);
                continue;
            }
            excluded.extend(self.self_match(query));
            runs.push(self.scorer.score(&self.catalog, query));
        }

        if runs.is_empty() {
            return Err(InvalidInputError::NoUsableQueries {
                count: queries.len(),
            });
        }

        let merged = merge_runs(runs);
        Ok(self.select(merged, &excluded, top_n))
    }

    /// Catalog row of the query movie itself, if it is in the catalog
    fn self_match(&self, query: &QueryMovie) -> Option<RowIndex> {
        let row = self.catalog.position_by_title(&query.title);
        if let Some(row) = row {
            debug!("Excluding row {} (self-match on title)", row);
        }
        row
    }

    fn select(
        &self,
        scored: Vec<ScoredCandidate>,
        excluded: &HashSet<RowIndex>,
        top_n: usize,
    ) -> Vec<Recommendation> {
        let ranked = ranker::exclude_rows(ranker::rank(scored), excluded);
        self.selector
            .select(&ranked, &self.catalog, top_n)
            .into_iter()
            .filter_map(|candidate| {
                let entry = self.catalog.get(candidate.index)?;
                Some(Recommendation {
                    index: candidate.index,
                    id: entry.id.clone(),
                    title: entry.title.clone(),
                    score: candidate.score,
                    breakdown: candidate.breakdown,
                })
            })
            .collect()
    }
}

/// Merge per-query score lists, keeping the highest score for each row.
/// On equal scores the earlier query wins. Output is in row order.
fn merge_runs(runs: Vec<Vec<ScoredCandidate>>) -> Vec<ScoredCandidate> {
    let mut best: HashMap<RowIndex, ScoredCandidate> = HashMap::new();
    for run in runs {
        for candidate in run {
            best.entry(candidate.index)
                .and_modify(|existing| {
                    if candidate.score > existing.score {
                        *existing = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }

    let mut merged: Vec<ScoredCandidate> = best.into_values().collect();
    merged.sort_by_key(|c| c.index);
    merged
}

fn log_rejected(err: &InvalidInputError) {
    match err {
        InvalidInputError::NoFeatures => debug!("Query skipped: {}", err),
        _ => warn!("Query rejected: {}", err),
    }
}
