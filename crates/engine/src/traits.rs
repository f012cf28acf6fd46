//! Core traits for the scoring engine.

use crate::query::QueryMovie;

/// Text component of the combined score.
///
/// Implementations are built once from the catalog and must return exactly
/// one value in `[0, 1]` per catalog row, in row order.
///
/// `Send + Sync` lets a single engine serve concurrent requests.
pub trait TextSimilarity: Send + Sync {
    /// Returns the name of this strategy (for logging/debugging)
    fn name(&self) -> &str;

    /// Similarity of the query's text to every catalog row
    fn similarities(&self, query: &QueryMovie) -> Vec<f64>;
}
