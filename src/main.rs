use anyhow::{Context, Result};
use clap::Parser;
use house_facing::sdk::{
    config::{FacingConfig, RoadSourceConfig},
    facing::{analyze_properties, BatchSummary, FacingCache, FacingReport, FacingResolver},
    properties::{load_properties_csv, OnTheHouseSource, PropertyQuery, PropertySource},
    roads::{OverpassFileProvider, OverpassProvider, RoadSetProvider},
    util::{log::init_logging, rate_limit::per_minute_limiter},
};
use std::path::PathBuf;

/// Infers which way houses face from the side of their nearest road
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// State code of the suburb to search (e.g., "NSW")
    #[arg(short, long, required_unless_present = "input")]
    state: Option<String>,

    /// Suburb name (e.g., "Picnic point")
    #[arg(long, required_unless_present = "input")]
    suburb: Option<String>,

    /// Postcode of the suburb (e.g., 2213)
    #[arg(short, long, required_unless_present = "input")]
    postcode: Option<String>,

    /// [Optional] CSV of `address,lat,lon` rows to analyze instead of a listing search
    #[arg(short, long, conflicts_with_all = ["state", "suburb", "postcode"])]
    input: Option<PathBuf>,

    /// [Optional] Road search radius in metres (overrides FACING_SEARCH_RADIUS_M)
    #[arg(short, long)]
    radius: Option<f64>,

    /// Where to write the JSON report
    #[arg(short, long, default_value = "facing_report.json")]
    output: PathBuf,

    /// Cache of previously resolved coordinates
    #[arg(long, default_value = "facing_cache.json")]
    cache: PathBuf,

    /// Neither read nor update the cache
    #[arg(long)]
    no_cache: bool,
}

fn main() -> Result<()> {
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = FacingConfig::from_env().context("Invalid configuration")?;

    let radius_m = cli.radius.unwrap_or(config.radius_m);
    if !radius_m.is_finite() || radius_m <= 0.0 {
        anyhow::bail!("Search radius must be a positive number of metres, got {}", radius_m);
    }

    // --- 1. Properties to analyze ---
    let (properties, source) = match &cli.input {
        Some(path) => {
            let properties = load_properties_csv(path)
                .with_context(|| format!("Failed to read properties from {}", path.display()))?;
            (properties, path.display().to_string())
        }
        None => {
            // clap guarantees all three are present without --input
            let query = PropertyQuery {
                state: cli.state.clone().unwrap_or_default(),
                suburb: cli.suburb.clone().unwrap_or_default(),
                postcode: cli.postcode.clone().unwrap_or_default(),
            };
            log::info!("Searching for properties in {}", query);
            let listing_source = OnTheHouseSource::new(
                &config.properties,
                &config.http,
                per_minute_limiter(config.http.requests_per_minute),
            )?;
            let properties = listing_source
                .fetch_properties(&query)
                .with_context(|| format!("Failed to fetch properties for {}", query))?;
            (properties, query.to_string())
        }
    };

    if properties.is_empty() {
        log::warn!("No properties found.");
        return Ok(());
    }
    log::info!("Found {} properties to analyze", properties.len());

    // --- 2. Road provider ---
    let provider: Box<dyn RoadSetProvider> = match &config.roads {
        RoadSourceConfig::Overpass { url } => Box::new(OverpassProvider::new(
            url.clone(),
            &config.http,
            per_minute_limiter(config.http.requests_per_minute),
        )?),
        RoadSourceConfig::File { path } => Box::new(
            OverpassFileProvider::load(path)
                .with_context(|| format!("Failed to load roads from {}", path.display()))?,
        ),
    };
    let resolver = FacingResolver::new(provider, radius_m);

    let mut cache = if cli.no_cache {
        FacingCache::default()
    } else {
        FacingCache::load_from_file(&cli.cache)
            .with_context(|| format!("Failed to load cache {}", cli.cache.display()))?
    };

    // --- 3. Analyze ---
    let results = analyze_properties(&properties, &resolver, &mut cache);
    let summary = BatchSummary::from_results(&results);
    log::info!(
        "Resolved {} of {} properties ({} from cache, {} failed)",
        summary.resolved,
        summary.total,
        summary.cached,
        summary.failed
    );

    // --- 4. Output ---
    FacingReport::new(source, radius_m, results)
        .write_to_file(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    log::info!("Report written to {}", cli.output.display());

    if !cli.no_cache {
        cache.save_to_file(&cli.cache)?;
        log::info!("Cache saved to {}", cli.cache.display());
    }

    Ok(())
}
