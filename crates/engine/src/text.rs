//! `TextSimilarity` strategies.
//!
//! - `QueryVectorSimilarity` projects the query into a TF-IDF space fit over
//!   each catalog entry's full feature text. This is the default.
//! - `OverviewRowMax` reuses the precomputed overview matrix and ignores the
//!   query's text entirely.

use crate::query::QueryMovie;
use crate::traits::TextSimilarity;
use catalog::Catalog;
use rayon::prelude::*;
use similarity::{SimilarityMatrices, SparseVector, TfidfVectorizer, Tokenizer, cosine_similarity};
use tracing::debug;

/// Cosine similarity between the query's feature text and each entry's.
///
/// The space is fit once at construction; requests only transform.
pub struct QueryVectorSimilarity {
    space: TfidfVectorizer,
    rows: Vec<SparseVector>,
}

impl QueryVectorSimilarity {
    pub fn fit(catalog: &Catalog) -> Self {
        let documents: Vec<String> = catalog.iter().map(|e| e.feature_text()).collect();
        let (space, rows) = TfidfVectorizer::fit_transform(Tokenizer::english(), &documents);
        debug!(
            "Fit query space over {} documents ({} terms)",
            rows.len(),
            space.vocabulary_len()
        );
        Self { space, rows }
    }
}

impl TextSimilarity for QueryVectorSimilarity {
    fn name(&self) -> &str {
        "QueryVectorSimilarity"
    }

    fn similarities(&self, query: &QueryMovie) -> Vec<f64> {
        let vector = self.space.transform(&query.feature_text());
        if vector.is_zero() {
            return vec![0.0; self.rows.len()];
        }
        self.rows
            .par_iter()
            .map(|row| cosine_similarity(&vector, row))
            .collect()
    }
}

/// Row maximum of the overview similarity matrix.
///
/// Independent of the query: every row with a non-empty overview scores ~1.
pub struct OverviewRowMax {
    maxima: Vec<f64>,
}

impl OverviewRowMax {
    pub fn new(matrices: &SimilarityMatrices) -> Self {
        Self {
            maxima: matrices.overview_similarity().row_maxima(),
        }
    }
}

impl TextSimilarity for OverviewRowMax {
    fn name(&self) -> &str {
        "OverviewRowMax"
    }

    fn similarities(&self, _query: &QueryMovie) -> Vec<f64> {
        self.maxima.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::RawMovie;
    use serde_json::json;

    fn sample_catalog() -> Catalog {
        let records: Vec<RawMovie> = serde_json::from_value(json!([
            {"id": 1, "overview": "a brave hero saves the day", "genres": ["Action"]},
            {"id": 2, "overview": "a quiet drama about family", "genres": ["Drama"]},
            {"id": 3, "overview": ""}
        ]))
        .unwrap();
        Catalog::from_records(records).unwrap()
    }

    #[test]
    fn test_query_vector_prefers_matching_text() {
        let catalog = sample_catalog();
        let strategy = QueryVectorSimilarity::fit(&catalog);
        let query = QueryMovie::from_value(&json!({
            "overview": "hero saves the city",
            "genres": [{"name": "Action"}]
        }))
        .unwrap();

        let sims = strategy.similarities(&query);
        assert_eq!(sims.len(), 3);
        assert!(sims[0] > sims[1]);
        assert_eq!(sims[2], 0.0);
    }

    #[test]
    fn test_query_vector_unknown_terms() {
        let catalog = sample_catalog();
        let strategy = QueryVectorSimilarity::fit(&catalog);
        let query = QueryMovie::from_value(&json!({"overview": "zebra"})).unwrap();
        assert_eq!(strategy.similarities(&query), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_overview_row_max_ignores_query() {
        let catalog = sample_catalog();
        let matrices = SimilarityMatrices::build(&catalog).unwrap();
        let strategy = OverviewRowMax::new(&matrices);

        let a = strategy.similarities(&QueryMovie::default());
        let b = strategy.similarities(&QueryMovie::from_entry(&catalog.entries()[0]));
        assert_eq!(a, b);
        assert!((a[0] - 1.0).abs() < 1e-9);
        assert_eq!(a[2], 0.0);
    }
}
