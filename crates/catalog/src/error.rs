//! Error types for the catalog crate.
//!
//! Everything here is fatal to index construction: an engine without a
//! usable catalog cannot serve a single request, so these errors are always
//! propagated to the caller of `build_index` rather than logged and dropped.

use thiserror::Error;

/// Errors that can occur while loading a catalog or building indices over it.
#[derive(Error, Debug)]
pub enum DataError {
    /// The catalog has no entries, so no similarity space can be built
    #[error("empty catalog")]
    EmptyCatalog,

    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A whole-document JSON payload could not be decoded
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Line in a JSON Lines file couldn't be parsed
    ///
    /// Carries enough context to point at the offending record.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A record field had an unusable value
    #[error("Invalid value for {field} in record {record}: {value}")]
    InvalidValue {
        field: String,
        record: usize,
        value: String,
    },

    /// The catalog file extension is not one we know how to read
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataError>;
