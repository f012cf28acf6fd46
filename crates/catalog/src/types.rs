//! Core domain types for the movie catalog.
//!
//! - `RawMovie` is a record exactly as it arrives from the dataset, with the
//!   loosely-typed attribute lists kept as JSON values.
//! - `CatalogEntry` is the normalized form the scorer works with.
//! - `Catalog` owns the entries in dataset order plus lookup indices.

use crate::error::{DataError, Result};
use crate::normalize::{self, EntryShape};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// External movie identifier, rendered as a string ("603", not 603)
pub type MovieId = String;

/// Position of an entry in the catalog. Every similarity matrix row uses the
/// same numbering.
pub type RowIndex = usize;

// =============================================================================
// Raw records
// =============================================================================

/// One movie record as supplied by the dataset.
///
/// Attribute lists stay as `Value` so that odd entries (bare numbers, nulls,
/// maps without `name`) can be skipped during normalization instead of failing
/// deserialization of the whole catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMovie {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Value,
    #[serde(default)]
    pub keywords: Value,
    #[serde(default)]
    pub production_countries: Value,
    #[serde(default)]
    pub spoken_languages: Value,
}

// =============================================================================
// Normalized entries
// =============================================================================

/// A catalog movie with every derived field precomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: MovieId,
    pub title: String,
    /// Trimmed, lower-cased title used for self-exclusion
    pub title_lower: String,
    /// Free text, empty when the dataset has none
    pub overview: String,
    pub genres: BTreeSet<String>,
    /// Space-joined keyword tokens
    pub keywords: String,
    pub production_countries: BTreeSet<String>,
    pub spoken_languages: BTreeSet<String>,
}

impl CatalogEntry {
    /// Normalize a raw record.
    ///
    /// `record` is the record's position in the dataset and only used for
    /// error context.
    pub fn from_raw(raw: &RawMovie, record: usize) -> Result<Self> {
        let id = render_id(&raw.id).ok_or_else(|| DataError::InvalidValue {
            field: "id".to_string(),
            record,
            value: raw.id.to_string(),
        })?;

        let title = raw.title.clone().unwrap_or_default();
        let title_lower = title.trim().to_lowercase();

        Ok(Self {
            id,
            title,
            title_lower,
            overview: raw.overview.clone().unwrap_or_default(),
            genres: normalize::token_set(&normalize::normalize_named(
                Some(&raw.genres),
                EntryShape::NamedOrBare,
            )),
            keywords: normalize::normalize_named(Some(&raw.keywords), EntryShape::NamedOrBare),
            production_countries: normalize::token_set(&normalize::normalize_named(
                Some(&raw.production_countries),
                EntryShape::NamedOrBare,
            )),
            spoken_languages: normalize::token_set(&normalize::normalize_named(
                Some(&raw.spoken_languages),
                EntryShape::NamedOrBare,
            )),
        })
    }

    /// Everything the entry says about itself as one document:
    /// genres, keywords, overview, countries, languages.
    pub fn feature_text(&self) -> String {
        [
            join_tokens(&self.genres),
            self.keywords.clone(),
            self.overview.clone(),
            join_tokens(&self.production_countries),
            join_tokens(&self.spoken_languages),
        ]
        .join(" ")
    }
}

/// Render a JSON id as a string. Strings are trimmed, integers printed,
/// anything else (or an empty string) is unusable.
fn render_id(value: &Value) -> Option<MovieId> {
    let rendered = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!rendered.is_empty()).then_some(rendered)
}

pub(crate) fn join_tokens(tokens: &BTreeSet<String>) -> String {
    tokens.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}

// =============================================================================
// Catalog - the in-memory store
// =============================================================================

/// All candidate movies, in dataset order.
///
/// Entries are only ever appended while loading. Once the catalog has been
/// handed to the scoring engine it is read-only, which is what keeps matrix
/// row `i` and `entries[i]` pointing at the same movie.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) entries: Vec<CatalogEntry>,
    /// `title_lower` -> first row carrying that title
    pub(crate) title_index: HashMap<String, RowIndex>,
    /// `id` -> first row carrying that id
    pub(crate) id_index: HashMap<MovieId, RowIndex>,
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by row
    pub fn get(&self, row: RowIndex) -> Option<&CatalogEntry> {
        self.entries.get(row)
    }

    /// All entries, in row order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Row of the first entry whose title matches, ignoring case and
    /// surrounding whitespace. A blank title never matches.
    pub fn position_by_title(&self, title: &str) -> Option<RowIndex> {
        let key = title.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.title_index.get(&key).copied()
    }

    /// Row of the first entry with this id
    pub fn position_by_id(&self, id: &str) -> Option<RowIndex> {
        self.id_index.get(id.trim()).copied()
    }

    /// Append an entry and update the lookup indices.
    ///
    /// Duplicate titles or ids keep pointing at the first row that used them.
    pub fn insert_entry(&mut self, entry: CatalogEntry) {
        let row = self.entries.len();
        if !entry.title_lower.is_empty() {
            self.title_index.entry(entry.title_lower.clone()).or_insert(row);
        }
        self.id_index.entry(entry.id.clone()).or_insert(row);
        self.entries.push(entry);
    }

    /// (entries, distinct genres) for logging
    pub fn counts(&self) -> (usize, usize) {
        let genres: BTreeSet<&String> = self.entries.iter().flat_map(|e| &e.genres).collect();
        (self.entries.len(), genres.len())
    }
}
