use std::path::PathBuf;

/// Zonal statistics and disaster-to-region matching CLI
#[derive(clap::Parser, Debug)]
#[command(name = "geotally", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Aggregate raster-cell extracts into coverage-weighted zonal statistics (forbids stdout)
    Zonal(ZonalArgs),

    /// Match geocoded disaster events to region polygons and count them (forbids stdout)
    Match(MatchArgs),
}

#[derive(clap::Args, Debug)]
pub struct ZonalArgs {
    /// Extract table with columns polygon_id, layer_id, value, coverage
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub extracts: PathBuf,

    /// Output statistics file, defaults to "./zonal.csv"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// JSON run configuration (conversion, strict, wide)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Convert aggregated values from Kelvin to Celsius
    #[arg(long)]
    pub kelvin: bool,

    /// Write one row per polygon with one column per layer
    #[arg(long)]
    pub wide: bool,

    /// Fail on the first zero-coverage group instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args, Debug)]
pub struct MatchArgs {
    /// Geocoded events with columns event_id, lat, lng (and optionally year, subgroup, country, location)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub events: PathBuf,

    /// Region polygons shapefile
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub regions: PathBuf,

    /// Output match file, defaults to "./matches.csv"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Also write per-region counts (every region, zero included)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub counts: Option<PathBuf>,

    /// Also write a GeoJSON FeatureCollection of regions with counts
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub geojson: Option<PathBuf>,

    /// Wide zonal statistics CSV to join onto the GeoJSON output (needs --geojson)
    #[arg(long, requires = "geojson", value_hint = clap::ValueHint::FilePath)]
    pub stats: Option<PathBuf>,

    /// Shapefile attribute holding the region id
    #[arg(long, default_value = "ID")]
    pub id_field: String,

    /// Shapefile attribute holding the region name
    #[arg(long)]
    pub name_field: Option<String>,

    /// Keep only events from this country (repeatable)
    #[arg(long)]
    pub country: Vec<String>,

    /// Keep only events of this disaster subgroup (repeatable)
    #[arg(long)]
    pub subgroup: Vec<String>,

    /// First year to keep (inclusive)
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year to keep (inclusive)
    #[arg(long)]
    pub to: Option<i32>,
}
