//! Text normalization for named movie attributes.
//!
//! Genres, keywords, countries and languages arrive as lists of
//! `{"name": "..."}` objects. Every name is collapsed into a single token
//! (lower-cased, whitespace removed) so that "Science Fiction" and
//! "science fiction" both become `sciencefiction`, and the tokens of one list
//! are joined with single spaces.

use serde_json::Value;
use std::collections::BTreeSet;

/// Which list entries count as usable when extracting names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    /// Only maps carrying a `name` field (query payloads)
    NamedOnly,
    /// Maps carrying a `name` field, or bare strings (pre-flattened datasets)
    NamedOrBare,
}

/// Collapse one attribute name into a token.
///
/// Example: "Science Fiction" -> "sciencefiction"
pub fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize every item and join the non-empty results with single spaces.
///
/// An empty input yields an empty string.
pub fn clean_text<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| normalize_token(item.as_ref()))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the names from a JSON list of named entries.
///
/// A missing value or a value that is not an array yields nothing. Entries
/// that don't fit `shape` are skipped.
pub fn named_values(list: Option<&Value>, shape: EntryShape) -> Vec<String> {
    let Some(Value::Array(items)) = list else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => map.get("name").and_then(scalar_text),
            Value::String(s) if shape == EntryShape::NamedOrBare => Some(s.clone()),
            _ => None,
        })
        .collect()
}

/// Shorthand for `clean_text(named_values(list, shape))`.
pub fn normalize_named(list: Option<&Value>, shape: EntryShape) -> String {
    clean_text(named_values(list, shape))
}

/// Split a normalized string back into its distinct tokens.
pub fn token_set(normalized: &str) -> BTreeSet<String> {
    normalized.split_whitespace().map(String::from).collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
