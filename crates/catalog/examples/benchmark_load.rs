use anyhow::Context;
use catalog::Catalog;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sample_catalog.json"));

    println!("Loading catalog from {}...\n", path.display());

    let start = Instant::now();
    let catalog = Catalog::load_from_file(&path).context("Failed to load catalog")?;
    let elapsed = start.elapsed();

    let (movies, genres) = catalog.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Genres: {}", genres);
    println!(
        "\nPerformance: {:.0} records/second",
        movies as f64 / elapsed.as_secs_f64()
    );

    Ok(())
}
