//! # Similarity Crate
//!
//! Text and set similarity primitives for content-based recommendations.
//!
//! ## Components
//!
//! - **tokenize**: alphabetic tokenizer with the English stop-word list
//! - **tfidf**: fitted TF-IDF vector spaces, sparse vectors, cosine similarity
//! - **matrix**: all-pairs overview/keyword similarity over a `Catalog`
//! - **jaccard**: overlap of categorical attribute sets
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::SimilarityMatrices;
//!
//! let matrices = SimilarityMatrices::build(&catalog)?;
//! let closest = matrices.overview_similarity().row_max(0);
//! ```

pub mod tokenize;
pub mod tfidf;
pub mod matrix;
pub mod jaccard;

pub use jaccard::jaccard;
pub use matrix::{SimilarityMatrices, SimilarityMatrix};
pub use tfidf::{SparseVector, TfidfVectorizer, cosine_similarity};
pub use tokenize::{ENGLISH_STOP_WORDS, Tokenizer};
