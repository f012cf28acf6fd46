//! Benchmarks for index build and recommendation
//!
//! Run with: cargo bench --package engine
//!
//! Uses a synthetic catalog so no dataset is needed.

use catalog::{Catalog, RawMovie};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use engine::{EngineConfig, ScoringEngine, TextStrategy};
use serde_json::{Value, json};

const GENRES: &[&str] = &[
    "Action", "Adventure", "Comedy", "Drama", "Horror", "Romance", "Science Fiction", "Thriller",
];
const WORDS: &[&str] = &[
    "hero", "journey", "city", "love", "war", "family", "secret", "space", "island", "detective",
    "murder", "dream", "robot", "king", "storm", "river", "ghost", "school", "heist", "border",
];
const COUNTRIES: &[&str] = &["United States", "France", "Japan", "India", "Germany"];
const LANGUAGES: &[&str] = &["English", "French", "Japanese", "Hindi", "German"];

fn pick<'a>(pool: &[&'a str], seed: usize, count: usize) -> Vec<&'a str> {
    (0..count).map(|k| pool[(seed * 7 + k * 13) % pool.len()]).collect()
}

fn synthetic_records(size: usize) -> Vec<RawMovie> {
    (0..size)
        .map(|i| {
            let overview = pick(WORDS, i, 12).join(" ");
            let value = json!({
                "id": i,
                "title": format!("Movie {i}"),
                "overview": overview,
                "genres": pick(GENRES, i, 1 + i % 3),
                "keywords": pick(WORDS, i + 3, 3),
                "production_countries": pick(COUNTRIES, i, 1),
                "spoken_languages": pick(LANGUAGES, i, 1 + i % 2),
            });
            serde_json::from_value(value).unwrap()
        })
        .collect()
}

fn sample_query() -> Value {
    json!({
        "title": "Benchmark Query",
        "overview": "a detective hunts a ghost through the city during a storm",
        "genres": [{"name": "Thriller"}, {"name": "Horror"}],
        "keywords": [{"name": "detective"}, {"name": "ghost"}],
        "production_countries": [{"name": "United States"}],
        "spoken_languages": [{"name": "English"}]
    })
}

fn build_engine(size: usize, strategy: TextStrategy) -> ScoringEngine {
    let catalog = Catalog::from_records(synthetic_records(size)).unwrap();
    ScoringEngine::build(catalog, EngineConfig::new().with_text_strategy(strategy)).unwrap()
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");
    group.sample_size(10);
    for size in [250, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let catalog = Catalog::from_records(synthetic_records(size)).unwrap();
                black_box(ScoringEngine::build(catalog, EngineConfig::default()).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let query = sample_query();

    let engine = build_engine(1000, TextStrategy::QueryVector);
    c.bench_function("recommend_query_vector", |b| {
        b.iter(|| black_box(engine.recommend(black_box(&query), black_box(8))))
    });

    let engine = build_engine(1000, TextStrategy::OverviewRowMax);
    c.bench_function("recommend_overview_row_max", |b| {
        b.iter(|| black_box(engine.recommend(black_box(&query), black_box(8))))
    });
}

criterion_group!(benches, bench_build_index, bench_recommend);
criterion_main!(benches);
