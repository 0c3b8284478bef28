//! Format-specific reading and writing.
//!
//! - `csv` - extracts, events, statistics, counts and matches (polars)
//! - `shp` - region polygons from shapefiles
//! - `geojson` - region FeatureCollections for choropleth rendering

mod csv;
mod geojson;
mod shp;

pub use csv::{
    read_events_csv, read_extracts_csv, read_wide_csv, write_counts_csv, write_matches_csv, write_stats_csv,
    write_wide_csv,
};
pub(crate) use geojson::feature_collection;
pub use geojson::write_geojson;
pub use shp::read_regions_shapefile;
