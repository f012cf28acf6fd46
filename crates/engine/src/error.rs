//! Query-side errors.
//!
//! None of these ever leave `ScoringEngine::recommend`; they exist so the
//! `try_*` entry points and tests can tell why a result came back empty.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    /// The query payload is not a JSON object
    #[error("Invalid movie data format: expected an object, got {found}")]
    NotAMap { found: &'static str },

    /// A scalar field has the wrong JSON type
    #[error("Invalid value for {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Genres, keywords, overview, countries and languages are all empty
    #[error("query has no usable features")]
    NoFeatures,

    /// A multi-movie request in which every query was rejected
    #[error("none of the {count} queries had usable features")]
    NoUsableQueries { count: usize },
}

pub type Result<T> = std::result::Result<T, InvalidInputError>;
