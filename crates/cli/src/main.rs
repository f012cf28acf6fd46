use anyhow::{Context, Result, anyhow, bail};
use catalog::{Catalog, CatalogEntry};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{EngineConfig, QueryMovie, Recommendation, ScoringEngine, TextStrategy};
use rand::seq::IndexedRandom;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// VaultRecs - content-based movie recommendations
#[derive(Parser)]
#[command(name = "vault-recs")]
#[command(about = "Recommend similar movies from a fixed catalog", long_about = None)]
struct Cli {
    /// Path to the catalog file (.json, .jsonl or .ndjson)
    #[arg(short, long, default_value = "data/sample_catalog.json")]
    catalog: PathBuf,

    /// Use the overview similarity row maximum for the text score
    #[arg(long, global = true)]
    overview_row_max: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to one or more reference movies
    Recommend {
        /// Title of a catalog movie to use as a reference (repeatable)
        #[arg(long, required_unless_present = "query_file", conflicts_with = "query_file")]
        title: Vec<String>,

        /// JSON file holding a movie object or an array of movie objects
        #[arg(long)]
        query_file: Option<PathBuf>,

        /// Number of recommendations to return
        #[arg(long, default_value = "8")]
        top_n: usize,

        /// Show the score components for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show a catalog movie's normalized fields
    Movie {
        /// Movie id
        #[arg(long)]
        id: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_file(&cli.catalog).context("Failed to load catalog")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Search { title } => handle_search(&catalog, &title),
        Commands::Movie { id } => handle_movie(&catalog, &id),
        command => {
            let strategy = if cli.overview_row_max {
                TextStrategy::OverviewRowMax
            } else {
                TextStrategy::QueryVector
            };
            let engine = Arc::new(build_engine(catalog, strategy)?);
            match command {
                Commands::Recommend {
                    title,
                    query_file,
                    top_n,
                    explain,
                } => handle_recommend(&engine, &title, query_file.as_deref(), top_n, explain),
                Commands::Benchmark {
                    requests,
                    concurrent,
                } => handle_benchmark(engine, requests, concurrent).await,
                Commands::Search { .. } | Commands::Movie { .. } => Ok(()),
            }
        }
    }
}

fn build_engine(catalog: Catalog, strategy: TextStrategy) -> Result<ScoringEngine> {
    let start = Instant::now();
    let engine = ScoringEngine::build(catalog, EngineConfig::new().with_text_strategy(strategy))
        .context("Failed to build similarity index")?;
    println!("{} Built index in {:?}", "✓".green(), start.elapsed());
    Ok(engine)
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &ScoringEngine,
    titles: &[String],
    query_file: Option<&Path>,
    top_n: usize,
    explain: bool,
) -> Result<()> {
    let recommendations = match query_file {
        Some(path) => {
            let queries = read_query_file(path)?;
            engine.try_recommend_many(&queries, top_n)?
        }
        None => {
            let queries = titles
                .iter()
                .map(|title| find_by_title(engine.catalog(), title).map(QueryMovie::from_entry))
                .collect::<Result<Vec<_>>>()?;
            engine.recommend_for_movies(&queries, top_n)?
        }
    };

    if recommendations.is_empty() {
        println!("{}", "No recommendations found.".yellow());
        return Ok(());
    }
    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Read a query file holding either one movie object or an array of them
fn read_query_file(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read query file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Query file {} is not valid JSON", path.display()))?;
    Ok(match value {
        Value::Array(items) => items,
        other => vec![other],
    })
}

/// Exact title match first, otherwise the best substring match
fn find_by_title<'a>(catalog: &'a Catalog, title: &str) -> Result<&'a CatalogEntry> {
    let row = catalog
        .position_by_title(title)
        .or_else(|| catalog.search_title(title).first().copied())
        .ok_or_else(|| anyhow!("No movie titled '{}' in the catalog", title))?;
    catalog
        .get(row)
        .ok_or_else(|| anyhow!("Catalog row {} is missing", row))
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: &str) -> Result<()> {
    let matches = catalog.search_title(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("{}", "No matches.".yellow());
        return Ok(());
    }
    for entry in matches.iter().take(20).filter_map(|&row| catalog.get(row)) {
        println!("{}: {} [{}]", entry.id, entry.title, join(&entry.genres));
    }
    if matches.len() > 20 {
        println!("... and {} more", matches.len() - 20);
    }
    Ok(())
}

/// Handle the 'movie' command
fn handle_movie(catalog: &Catalog, id: &str) -> Result<()> {
    let entry = catalog
        .position_by_id(id)
        .and_then(|row| catalog.get(row))
        .ok_or_else(|| anyhow!("Movie {} not found", id))?;

    println!("{}", format!("Movie ID: {}", entry.id).bold().blue());
    println!("{}Title: {}", "• ".green(), entry.title);
    println!("{}Genres: {}", "• ".green(), join(&entry.genres));
    println!("{}Keywords: {}", "• ".green(), entry.keywords);
    println!("{}Countries: {}", "• ".green(), join(&entry.production_countries));
    println!("{}Languages: {}", "• ".green(), join(&entry.spoken_languages));
    if !entry.overview.is_empty() {
        println!("{}Overview: {}", "• ".cyan(), entry.overview);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: Arc<ScoringEngine>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Random catalog movies as queries
    let queries: Vec<Value> = {
        let entries = engine.catalog().entries();
        let mut rng = rand::rng();
        (0..requests)
            .filter_map(|_| entries.choose(&mut rng))
            .map(query_value)
            .collect()
    };
    info!(requests, concurrent, "Starting benchmark");

    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall = Instant::now();
    let mut handles = vec![];
    for query in queries {
        let engine = engine.clone();
        let permit = limiter.clone().acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let ids = engine.recommend(&query, 8);
            drop(permit);
            (start.elapsed(), ids.len())
        });
        handles.push(handle);
    }

    let mut timings = vec![];
    let mut returned = 0;
    for handle in handles {
        let (elapsed, count) = handle.await?;
        timings.push(elapsed);
        returned += count;
    }
    let total_time = wall.elapsed();

    timings.sort();
    let sum: Duration = timings.iter().sum();
    let avg_latency = sum / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", timings.len(), concurrent);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    println!("Average results per request: {:.2}", returned as f64 / timings.len() as f64);

    Ok(())
}

/// Rebuild a JSON query from a catalog entry, in the request shape
fn query_value(entry: &CatalogEntry) -> Value {
    let named = |items: &std::collections::BTreeSet<String>| -> Vec<Value> {
        items.iter().map(|name| serde_json::json!({ "name": name })).collect()
    };
    let keywords: Vec<Value> = entry
        .keywords
        .split_whitespace()
        .map(|name| serde_json::json!({ "name": name }))
        .collect();

    serde_json::json!({
        "title": entry.title,
        "overview": entry.overview,
        "genres": named(&entry.genres),
        "keywords": keywords,
        "production_countries": named(&entry.production_countries),
        "spoken_languages": named(&entry.spoken_languages),
    })
}

/// Format and print recommendations
fn print_recommendations(recommendations: &[Recommendation], explain: bool) {
    println!("{}", "Movie Recommendations:".bold().blue());
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} (id {}) - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.id,
            rec.score
        );
        if explain {
            let b = &rec.breakdown;
            println!(
                "   text {:.3} | keywords {:.3} | genres {:.3} | countries {:.3} | languages {:.3}",
                b.text, b.keywords, b.genres, b.countries, b.languages
            );
        }
    }
}

fn join(items: &std::collections::BTreeSet<String>) -> String {
    items.iter().cloned().collect::<Vec<_>>().join(", ")
}
