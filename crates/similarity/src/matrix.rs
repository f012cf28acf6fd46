//! Pairwise similarity matrices over the catalog.
//!
//! Both matrices are `N x N`, row-major, and indexed by catalog row. They are
//! built once and never mutated afterwards.

use crate::tfidf::{SparseVector, TfidfVectorizer, cosine_similarity};
use crate::tokenize::Tokenizer;
use catalog::{Catalog, DataError, RowIndex};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Dense square matrix of cosine similarities
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// All-pairs cosine similarity of `vectors`, rows computed in parallel.
    ///
    /// `dot` multiplies matching entries in column order whichever side it is
    /// called from, so `[i][j]` and `[j][i]` come out bit-identical.
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let mut values = vec![0.0; size * size];
        if size > 0 {
            values
                .par_chunks_mut(size)
                .enumerate()
                .for_each(|(i, row)| {
                    for (j, cell) in row.iter_mut().enumerate() {
                        *cell = cosine_similarity(&vectors[i], &vectors[j]);
                    }
                });
        }
        Self { size, values }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: RowIndex, col: RowIndex) -> f64 {
        self.values[row * self.size + col]
    }

    pub fn row(&self, row: RowIndex) -> &[f64] {
        &self.values[row * self.size..(row + 1) * self.size]
    }

    /// Largest value in a row; 0 for an all-zero row
    pub fn row_max(&self, row: RowIndex) -> f64 {
        self.row(row).iter().copied().fold(0.0, f64::max)
    }

    /// `row_max` for every row, in row order
    pub fn row_maxima(&self) -> Vec<f64> {
        (0..self.size).map(|row| self.row_max(row)).collect()
    }
}

/// The overview and keyword similarity matrices of one catalog
#[derive(Debug, Clone)]
pub struct SimilarityMatrices {
    overview: SimilarityMatrix,
    keywords: SimilarityMatrix,
}

impl SimilarityMatrices {
    /// Build both matrices from the catalog's overview and keyword text.
    ///
    /// Fails with `DataError::EmptyCatalog` when there is nothing to index.
    #[instrument(skip_all, fields(entries = catalog.len()))]
    pub fn build(catalog: &Catalog) -> Result<Self, DataError> {
        if catalog.is_empty() {
            return Err(DataError::EmptyCatalog);
        }
        let start = Instant::now();

        let overviews: Vec<&str> = catalog.iter().map(|e| e.overview.as_str()).collect();
        let (space, vectors) = TfidfVectorizer::fit_transform(Tokenizer::english(), &overviews);
        debug!("Overview vocabulary: {} terms", space.vocabulary_len());
        let overview = SimilarityMatrix::from_vectors(&vectors);

        let keywords: Vec<&str> = catalog.iter().map(|e| e.keywords.as_str()).collect();
        let (space, vectors) = TfidfVectorizer::fit_transform(Tokenizer::english(), &keywords);
        debug!("Keyword vocabulary: {} terms", space.vocabulary_len());
        let keywords = SimilarityMatrix::from_vectors(&vectors);

        info!(
            "Built {}x{} similarity matrices in {:.2?}",
            catalog.len(),
            catalog.len(),
            start.elapsed()
        );
        Ok(Self { overview, keywords })
    }

    pub fn overview_similarity(&self) -> &SimilarityMatrix {
        &self.overview
    }

    pub fn keyword_similarity(&self) -> &SimilarityMatrix {
        &self.keywords
    }

    /// Number of catalog rows the matrices cover
    pub fn len(&self) -> usize {
        self.overview.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
