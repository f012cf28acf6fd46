//! Parsers for catalog dataset files.
//!
//! Two layouts are supported:
//! - `.json`: a single JSON array of movie records
//! - `.jsonl` / `.ndjson`: one JSON record per line
//!
//! Record shape (extra fields are ignored):
//!
//! ```text
//! {"id": 603, "title": "The Matrix", "overview": "...",
//!  "genres": [{"name": "Action"}], "keywords": [{"name": "hacker"}],
//!  "production_countries": [{"name": "United States of America"}],
//!  "spoken_languages": [{"name": "English"}]}
//! ```

use crate::error::{DataError, Result};
use crate::types::RawMovie;
use std::fs;
use std::path::Path;

/// File layouts the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    JsonArray,
    JsonLines,
}

impl CatalogFormat {
    /// Pick the layout from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Ok(Self::JsonArray),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            other => Err(DataError::UnsupportedFormat(other.to_string())),
        }
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Parse a file holding one JSON array of records
pub fn parse_json_array(path: &Path) -> Result<Vec<RawMovie>> {
    let content = read_to_string(path)?;
    parse_json_array_str(&content)
}

/// Parse an in-memory JSON array of records
pub fn parse_json_array_str(content: &str) -> Result<Vec<RawMovie>> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a JSON Lines file
pub fn parse_json_lines(path: &Path) -> Result<Vec<RawMovie>> {
    let content = read_to_string(path)?;
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_json_lines_str(&content, &file)
}

/// Parse in-memory JSON Lines content; `file` is only used in error messages
pub fn parse_json_lines_str(content: &str, file: &str) -> Result<Vec<RawMovie>> {
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let record: RawMovie =
            serde_json::from_str(line_trimmed).map_err(|e| DataError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: e.to_string(),
            })?;
        records.push(record);
    }

    Ok(records)
}

/// Parse a catalog file, choosing the layout from its extension
pub fn parse_catalog(path: &Path) -> Result<Vec<RawMovie>> {
    match CatalogFormat::from_path(path)? {
        CatalogFormat::JsonArray => parse_json_array(path),
        CatalogFormat::JsonLines => parse_json_lines(path),
    }
}
