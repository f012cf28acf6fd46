//! Content-based movie scoring engine.
//!
//! This crate provides:
//! - QueryMovie for validating and normalizing JSON queries
//! - TextSimilarity trait and its two strategies
//! - QueryScorer for the weighted content score
//! - DiversitySelector for genre-aware top-N selection
//! - ScoringEngine tying everything together over one catalog
//!
//! ## Architecture
//! A request flows through these stages:
//! 1. The query is validated (non-maps are rejected, lists are normalized)
//! 2. Every catalog row gets a combined score
//! 3. Rows are ranked and the query movie itself is dropped
//! 4. The top N are picked, keeping genre coverage in check
//!
//! ## Example Usage
//! ```ignore
//! use engine::build_index;
//! use serde_json::json;
//!
//! let engine = build_index(records)?;
//! let ids = engine.recommend(&json!({"title": "Alpha", "overview": "..."}), 8);
//! ```

pub mod error;
pub mod query;
pub mod traits;
pub mod text;
pub mod scorer;
pub mod ranker;
pub mod engine;

// Re-export main types
pub use engine::{
    DEFAULT_TOP_N, EngineConfig, Recommendation, ScoringEngine, TextStrategy, build_index,
};
pub use error::{InvalidInputError, Result};
pub use query::QueryMovie;
pub use ranker::DiversitySelector;
pub use scorer::{QueryScorer, ScoreBreakdown, ScoredCandidate};
pub use text::{OverviewRowMax, QueryVectorSimilarity};
pub use traits::TextSimilarity;
