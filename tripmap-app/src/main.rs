use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tripmap::{
    GeoJson, GeocodeCache, Itinerary, MapError, MapView, NominatimBackend, PipelineOptions,
    PipelineProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full scene description as JSON
    Scene,
    /// Markers and route as a GeoJSON FeatureCollection
    Geojson,
}

/// Geocode one itinerary day and print its map scene
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Itinerary JSON file
    itinerary: PathBuf,

    #[arg(long, default_value_t = 1)]
    day: u32,

    /// Overrides the itinerary's destination
    #[arg(long)]
    destination: Option<String>,

    /// Preset: polite (public Nominatim) or fast (self-hosted geocoder)
    #[arg(long, env = "TRIPMAP_PROFILE", default_value = "polite")]
    profile: String,

    /// JSON file with pipeline options; takes precedence over --profile
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Scene)]
    format: OutputFormat,

    #[arg(long, env = "TRIPMAP_NOMINATIM_URL")]
    nominatim_url: Option<String>,

    #[arg(long, env = "TRIPMAP_USER_AGENT")]
    user_agent: Option<String>,
}

fn read_file(path: &Path) -> tripmap::Result<String> {
    Ok(std::fs::read_to_string(path).map_err(MapError::from)?)
}

fn load_options(args: &Args) -> tripmap::Result<PipelineOptions> {
    let mut options = match &args.config {
        Some(path) => PipelineOptions::from_json(&read_file(path)?)?,
        None => PipelineProfile::from_name(&args.profile)
            .ok_or_else(|| MapError::Config(format!("unknown profile {:?}", args.profile)))?
            .resolve(),
    };

    if let Some(url) = &args.nominatim_url {
        options.geocoder.base_url = url.clone();
    }
    if let Some(user_agent) = &args.user_agent {
        options.geocoder.user_agent = user_agent.clone();
    }
    options.validate()?;

    Ok(options)
}

#[tokio::main]
async fn main() -> tripmap::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = load_options(&args)?;
    let itinerary = Itinerary::from_json(&read_file(&args.itinerary)?)?;

    let destination = args
        .destination
        .as_deref()
        .or_else(|| itinerary.destination())
        .unwrap_or_default()
        .to_string();
    let activities = itinerary.activities_for_day(args.day);
    log::info!(
        "day {}: {} activities, destination {:?}",
        args.day,
        activities.len(),
        destination
    );

    let backend = NominatimBackend::new(&options.geocoder)?;
    let view = MapView::from_options(Arc::new(backend), GeocodeCache::new(), &options);

    let scene = view
        .update(activities, args.day, &destination)
        .await
        .ok_or("map update was superseded")?;

    let output = match args.format {
        OutputFormat::Scene => scene.to_json()?,
        OutputFormat::Geojson => GeoJson::from_scene(&scene).to_json()?,
    };
    println!("{}", output);

    let stats = view.placer().resolver().cache().stats();
    log::info!(
        "geocode cache: {} entries, {} hits, {} misses",
        stats.entries,
        stats.hits,
        stats.misses
    );

    Ok(())
}
