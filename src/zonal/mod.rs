mod aggregate;
mod error;
mod extract;
mod reshape;
mod units;

pub use aggregate::{aggregate, sort_stats, Aggregation, ZonalAggregator};
pub use error::{AggregationError, ExtractError};
pub use extract::{CellExtract, ZonalStatistic};
pub use reshape::{to_long, to_wide, WideTable};
pub use units::UnitConversion;
