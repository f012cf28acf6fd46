//! TF-IDF vector space and sparse cosine similarity.
//!
//! Weighting follows the usual smoothed scheme:
//! - TF: raw term count in the document
//! - IDF: `ln((1 + n) / (1 + df)) + 1`
//! - every document vector is L2-normalized
//!
//! Vocabulary columns are assigned in sorted term order, so a fitted space is
//! fully deterministic for a given corpus.

use crate::tokenize::Tokenizer;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sparse vector with entries sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from (column, value) pairs; zero values are dropped
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.retain(|&(_, v)| v != 0.0);
        pairs.sort_by_key(|&(col, _)| col);
        Self { entries: pairs }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Dot product via a merge walk over both sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ci, vi) = self.entries[i];
            let (cj, vj) = other.entries[j];
            match ci.cmp(&cj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += vi * vj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
        self
    }
}

/// Cosine similarity of two non-negative vectors, clamped to `[0, 1]`.
///
/// A zero vector has similarity 0 with everything, itself included.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// A fitted TF-IDF vector space.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit a space over `documents` and return it with the documents' vectors,
    /// one per document in input order.
    pub fn fit_transform<S>(tokenizer: Tokenizer, documents: &[S]) -> (Self, Vec<SparseVector>)
    where
        S: AsRef<str> + Sync,
    {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| tokenizer.tokenize(doc.as_ref()))
            .collect();

        // Document frequency: how many documents contain each term
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (column, (term, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), column);
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }

        let vectorizer = Self {
            tokenizer,
            vocabulary,
            idf,
        };
        let vectors = tokenized
            .par_iter()
            .map(|tokens| vectorizer.weigh(tokens))
            .collect();

        (vectorizer, vectors)
    }

    /// Project a new document into the fitted space. Terms outside the
    /// vocabulary are ignored, so an unrelated document maps to a zero vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        self.weigh(&self.tokenizer.tokenize(document))
    }

    /// Number of distinct terms in the vocabulary
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// IDF weight of a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&col| self.idf[col])
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&col) = self.vocabulary.get(token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();
        SparseVector::from_pairs(pairs).normalized()
    }
}
