use clap::{Args, Parser, Subcommand};

use vegmap_core::{GeoPoint, SearchFilters};
use vegmap_engine::{RankedPlace, SearchRequest};

#[derive(Debug, Parser)]
#[command(name = "vegmap-cli")]
#[command(about = "Vegmap command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for veg-friendly places around a point.
    Search(SearchArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Latitude of the search center.
    #[arg(long)]
    lat: f64,
    /// Longitude of the search center.
    #[arg(long)]
    lng: f64,
    /// Free-text query; defaults to a veg-restaurant query for the region.
    #[arg(long)]
    query: Option<String>,
    /// Commercial search radius in kilometers.
    #[arg(long, default_value_t = 20.0)]
    max_km: f64,
    /// Drop places rated below this (unrated places count as 0).
    #[arg(long, default_value_t = 0.0)]
    min_rating: f64,
    /// Exact price level, 0–4.
    #[arg(long)]
    price: Option<u8>,
    /// Exact cuisine tag, e.g. "thai".
    #[arg(long)]
    cuisine: Option<String>,
    /// Print raw JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => run_search(args).await,
    }
}

async fn run_search(args: SearchArgs) -> anyhow::Result<()> {
    let config = vegmap_core::load_app_config()?;

    let places = vegmap_places::PlacesClient::new(
        &config.google_places_api_key,
        config.provider_timeout_secs,
    )?
    .with_retry_policy(
        config.provider_max_retries,
        config.provider_retry_backoff_base_ms,
    );
    let overpass = vegmap_osm::OverpassClient::new(config.provider_timeout_secs)?;

    let request = SearchRequest {
        query: args.query,
        center: GeoPoint::new(args.lat, args.lng),
        filters: SearchFilters {
            max_distance_km: args.max_km,
            min_rating: args.min_rating,
            price: args.price,
            cuisine: args.cuisine,
        },
    };

    let results = vegmap_engine::search(&places, &overpass, &config.region_name, &request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(&results);
    }
    Ok(())
}

fn print_table(results: &[RankedPlace]) {
    if results.is_empty() {
        println!("no places matched");
        return;
    }

    println!(
        "{:>3}  {:<40} {:>6} {:>6} {:>8}  {}",
        "#", "name", "rating", "score", "dist km", "label"
    );
    for (index, entry) in results.iter().enumerate() {
        let rating = entry
            .place
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        println!(
            "{:>3}  {:<40} {:>6} {:>6} {:>8.2}  {}",
            index + 1,
            truncate(&entry.place.name, 40),
            rating,
            entry.place.friendliness_score,
            entry.distance_km,
            entry.place.friendliness_label,
        );
    }
}

fn truncate(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut shortened: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
