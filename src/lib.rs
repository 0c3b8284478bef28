#![doc = "geotally public API"]
mod config;
mod disaster;
mod geom;
mod io;
mod report;
mod types;
mod zonal;

#[doc(inline)]
pub use types::{EventId, LayerId, PolygonId, RegionId};

#[doc(inline)]
pub use zonal::{
    aggregate, sort_stats, to_long, to_wide, Aggregation, AggregationError, CellExtract,
    ExtractError, UnitConversion, WideTable, ZonalAggregator, ZonalStatistic,
};

#[doc(inline)]
pub use disaster::{
    count_by_region, dedup_matches, match_events, Coordinates, DisasterEvent,
    DisasterRegionMatch, DisasterRegionMatcher, EventFilter, MatchError, MatchOutcome,
    MatchSummary, RegionPolygon,
};

#[doc(inline)]
pub use geom::GeometryError;

#[doc(inline)]
pub use report::RegionReport;

#[doc(inline)]
pub use config::ZonalConfig;

#[doc(inline)]
pub use io::{
    read_events_csv, read_extracts_csv, read_regions_shapefile, read_wide_csv, write_counts_csv,
    write_geojson, write_matches_csv, write_stats_csv, write_wide_csv,
};
