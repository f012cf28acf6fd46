//! Integration tests for the scoring engine.
//!
//! These build an engine from raw records, the way the CLI does, and check
//! the end-to-end recommendation behavior.

use catalog::{DataError, RawMovie};
use engine::{EngineConfig, InvalidInputError, ScoringEngine, TextStrategy, build_index};
use serde_json::{Value, json};
use std::sync::Arc;

fn records(value: Value) -> Vec<RawMovie> {
    serde_json::from_value(value).unwrap()
}

fn two_movie_catalog() -> Vec<RawMovie> {
    records(json!([
        {
            "id": 1,
            "title": "Alpha",
            "overview": "space adventure",
            "genres": [{"name": "Sci Fi"}],
            "keywords": [{"name": "space"}],
            "production_countries": [{"name": "US"}],
            "spoken_languages": [{"name": "English"}]
        },
        {
            "id": 2,
            "title": "Beta",
            "overview": "romantic comedy",
            "genres": [{"name": "Comedy"}],
            "keywords": [{"name": "love"}],
            "production_countries": [{"name": "FR"}],
            "spoken_languages": [{"name": "French"}]
        }
    ]))
}

fn mixed_catalog() -> Vec<RawMovie> {
    records(json!([
        {"id": 10, "title": "Star Voyage", "overview": "a crew travels through deep space to a distant star",
         "genres": ["Science Fiction", "Adventure"], "keywords": ["space", "starship"],
         "production_countries": ["United States"], "spoken_languages": ["English"]},
        {"id": 11, "title": "Galaxy Run", "overview": "smugglers race across the galaxy in a stolen starship",
         "genres": ["Science Fiction", "Action"], "keywords": ["starship", "smuggler"],
         "production_countries": ["United States"], "spoken_languages": ["English"]},
        {"id": 12, "title": "Paris Hearts", "overview": "two strangers fall in love in paris",
         "genres": ["Romance", "Comedy"], "keywords": ["love", "paris"],
         "production_countries": ["France"], "spoken_languages": ["French"]},
        {"id": 13, "title": "Quiet Harbor", "overview": "a fishing family faces a hard winter",
         "genres": ["Drama"], "keywords": ["family", "winter"],
         "production_countries": ["Canada"], "spoken_languages": ["English", "French"]},
        {"id": 14, "title": "Iron Fist", "overview": "a retired fighter returns for one last fight",
         "genres": ["Action"], "keywords": ["martial arts"],
         "production_countries": ["Hong Kong"], "spoken_languages": ["Cantonese"]},
        {"id": 15, "title": "Moon Base", "overview": "astronauts stranded on the moon fight to survive in space",
         "genres": ["Science Fiction", "Thriller"], "keywords": ["space", "moon"],
         "production_countries": ["United Kingdom"], "spoken_languages": ["English"]}
    ]))
}

#[test]
fn test_query_movie_is_never_recommended() {
    let engine = build_index(two_movie_catalog()).unwrap();
    let query = json!({
        "title": "Alpha",
        "overview": "space adventure",
        "genres": [{"name": "Sci Fi"}],
        "keywords": [{"name": "space"}],
        "production_countries": [{"name": "US"}],
        "spoken_languages": [{"name": "English"}]
    });

    let ids = engine.recommend(&query, 8);
    assert_eq!(ids, vec!["2".to_string()]);
}

#[test]
fn test_recommendations_are_deterministic() {
    let first = build_index(mixed_catalog()).unwrap();
    let second = build_index(mixed_catalog()).unwrap();
    let query = json!({
        "title": "Space Trip",
        "overview": "a starship lost in deep space",
        "genres": [{"name": "Science Fiction"}]
    });

    let a = first.recommend(&query, 4);
    let b = first.recommend(&query, 4);
    let c = second.recommend(&query, 4);
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_result_size_is_bounded() {
    let engine = build_index(mixed_catalog()).unwrap();
    let query = json!({"overview": "space", "genres": [{"name": "Action"}]});

    for top_n in [0, 1, 3, 8, 100] {
        let ids = engine.recommend(&query, top_n);
        assert!(ids.len() <= top_n);
        assert!(ids.len() <= engine.catalog().len());
    }
    assert!(engine.recommend(&query, 0).is_empty());
}

#[test]
fn test_science_fiction_query_ranks_space_movies_first() {
    let engine = build_index(mixed_catalog()).unwrap();
    let query = json!({
        "title": "Outer Rim",
        "overview": "a starship crew explores deep space",
        "genres": [{"name": "Science Fiction"}],
        "keywords": [{"name": "space"}, {"name": "starship"}],
        "production_countries": [{"name": "United States"}],
        "spoken_languages": [{"name": "English"}]
    });

    let recs = engine.recommend_detailed(&query, 3).unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].id, "10");
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_featureless_query_returns_nothing() {
    let engine = build_index(mixed_catalog()).unwrap();
    let query = json!({
        "title": "Star Voyage",
        "overview": "",
        "genres": [],
        "keywords": [],
        "production_countries": [],
        "spoken_languages": []
    });

    assert!(engine.recommend(&query, 8).is_empty());
    assert_eq!(
        engine.try_recommend(&query, 8),
        Err(InvalidInputError::NoFeatures)
    );
}

#[test]
fn test_non_map_query_returns_nothing() {
    let engine = build_index(mixed_catalog()).unwrap();
    for query in [json!("Star Voyage"), json!(["Star Voyage"]), json!(null), json!(7)] {
        assert!(engine.recommend(&query, 8).is_empty());
    }
}

#[test]
fn test_empty_catalog_is_a_data_error() {
    let result = build_index(Vec::new());
    assert!(matches!(result, Err(DataError::EmptyCatalog)));
}

#[test]
fn test_multi_movie_query() {
    let engine = build_index(mixed_catalog()).unwrap();
    let queries = vec![
        json!({"title": "Star Voyage", "overview": "a crew travels through deep space to a distant star",
               "genres": [{"name": "Science Fiction"}, {"name": "Adventure"}]}),
        json!({"title": "Paris Hearts", "overview": "two strangers fall in love in paris",
               "genres": [{"name": "Romance"}, {"name": "Comedy"}]}),
    ];

    let ids = engine.recommend_many(&queries, 8);
    assert!(!ids.is_empty());
    assert!(!ids.contains(&"10".to_string()));
    assert!(!ids.contains(&"12".to_string()));

    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_overview_row_max_strategy() {
    let catalog = catalog::Catalog::from_records(mixed_catalog()).unwrap();
    let config = EngineConfig::new().with_text_strategy(TextStrategy::OverviewRowMax);
    let engine = ScoringEngine::build(catalog, config).unwrap();

    let recs = engine
        .recommend_detailed(&json!({"genres": [{"name": "Drama"}]}), 8)
        .unwrap();
    assert!(!recs.is_empty());
    assert_eq!(recs[0].id, "13");
    for rec in &recs {
        assert!(rec.breakdown.text >= 0.0 && rec.breakdown.text <= 1.0 + 1e-9);
    }
}

#[test]
fn test_entries_without_text_do_not_break_scoring() {
    let engine = build_index(records(json!([
        {"id": 1, "title": "Silent", "genres": ["Drama"]},
        {"id": 2, "title": "Empty", "overview": "", "keywords": []},
        {"id": 3, "title": "Talky", "overview": "people talk a lot", "genres": ["Drama"]}
    ])))
    .unwrap();

    let recs = engine
        .recommend_detailed(&json!({"overview": "nothing matches here", "genres": [{"name": "Drama"}]}), 8)
        .unwrap();
    assert_eq!(recs.len(), 3);
    for rec in &recs {
        assert!(rec.score.is_finite());
        assert!(rec.score >= 0.0);
    }
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = Arc::new(build_index(mixed_catalog()).unwrap());
    let query = json!({"overview": "space", "genres": [{"name": "Science Fiction"}]});
    let expected = engine.recommend(&query, 3);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let query = query.clone();
            std::thread::spawn(move || engine.recommend(&query, 3))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
