//! The reference movie a recommendation request is made for.
//!
//! Queries arrive as loosely-typed JSON (usually a metadata-API movie
//! payload). `QueryMovie::from_value` is the only place that shape is
//! checked; everything downstream works on normalized tokens.

use crate::error::{InvalidInputError, Result};
use catalog::{CatalogEntry, EntryShape, normalize_named, token_set};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Normalized features of one query movie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryMovie {
    pub title: String,
    pub overview: String,
    pub genres: BTreeSet<String>,
    /// Space-joined keyword tokens
    pub keywords: String,
    pub production_countries: BTreeSet<String>,
    pub spoken_languages: BTreeSet<String>,
}

impl QueryMovie {
    /// Validate and normalize a JSON query.
    ///
    /// The payload must be an object. `title` and `overview` may be missing or
    /// null but must otherwise be strings. List entries that are not
    /// `{name}` objects are ignored.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(InvalidInputError::NotAMap {
                found: json_kind(value),
            });
        };

        Ok(Self {
            title: optional_string(map, "title")?,
            overview: optional_string(map, "overview")?,
            genres: named_set(map, "genres"),
            keywords: normalize_named(map.get("keywords"), EntryShape::NamedOnly),
            production_countries: named_set(map, "production_countries"),
            spoken_languages: named_set(map, "spoken_languages"),
        })
    }

    /// Query for a movie that is already in the catalog
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            overview: entry.overview.clone(),
            genres: entry.genres.clone(),
            keywords: entry.keywords.clone(),
            production_countries: entry.production_countries.clone(),
            spoken_languages: entry.spoken_languages.clone(),
        }
    }

    /// Genres, keywords, overview, countries and languages as one document,
    /// in that order
    pub fn feature_text(&self) -> String {
        [
            join(&self.genres),
            self.keywords.clone(),
            self.overview.clone(),
            join(&self.production_countries),
            join(&self.spoken_languages),
        ]
        .join(" ")
    }

    /// False when there is nothing to score against
    pub fn has_features(&self) -> bool {
        !self.feature_text().trim().is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn optional_string(map: &Map<String, Value>, field: &'static str) -> Result<String> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(InvalidInputError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn named_set(map: &Map<String, Value>, field: &str) -> BTreeSet<String> {
    token_set(&normalize_named(map.get(field), EntryShape::NamedOnly))
}

fn join(tokens: &BTreeSet<String>) -> String {
    tokens.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_normalizes_lists() {
        let query = QueryMovie::from_value(&json!({
            "title": "Alpha",
            "overview": "a brave hero saves the day",
            "genres": [{"name": "Action"}, {"name": "Science Fiction"}, "Drama", null],
            "keywords": [{"name": "Time Travel"}, {"id": 3}],
            "production_countries": [{"name": "United Kingdom"}],
            "spoken_languages": []
        }))
        .unwrap();

        assert_eq!(query.title, "Alpha");
        assert_eq!(query.genres.len(), 2);
        assert!(query.genres.contains("sciencefiction"));
        assert_eq!(query.keywords, "timetravel");
        assert!(query.production_countries.contains("unitedkingdom"));
        assert!(query.spoken_languages.is_empty());
        assert!(query.has_features());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert_eq!(
            QueryMovie::from_value(&json!(["Alpha"])),
            Err(InvalidInputError::NotAMap { found: "array" })
        );
        assert_eq!(
            QueryMovie::from_value(&json!("Alpha")),
            Err(InvalidInputError::NotAMap { found: "string" })
        );
    }

    #[test]
    fn test_non_string_title_is_rejected() {
        let err = QueryMovie::from_value(&json!({"title": 12})).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::InvalidField {
                field: "title",
                expected: "a string"
            }
        );
    }

    #[test]
    fn test_null_fields_are_empty() {
        let query = QueryMovie::from_value(&json!({"title": null, "overview": null})).unwrap();
        assert_eq!(query, QueryMovie::default());
        assert!(!query.has_features());
    }

    #[test]
    fn test_title_alone_is_not_a_feature() {
        let query = QueryMovie::from_value(&json!({
            "title": "Alpha",
            "overview": "   ",
            "genres": [],
            "keywords": [{"name": ""}]
        }))
        .unwrap();
        assert!(!query.has_features());
    }

    #[test]
    fn test_feature_text_order() {
        let query = QueryMovie::from_value(&json!({
            "overview": "space battle",
            "genres": [{"name": "Drama"}, {"name": "Action"}],
            "keywords": [{"name": "war"}],
            "production_countries": [{"name": "France"}],
            "spoken_languages": [{"name": "French"}]
        }))
        .unwrap();
        assert_eq!(query.feature_text(), "action drama war space battle france french");
    }
}
