mod count;
mod error;
mod event;
mod filter;
mod matcher;
mod region;

pub use count::{count_by_region, MatchSummary};
pub use error::MatchError;
pub use event::{Coordinates, DisasterEvent};
pub use filter::EventFilter;
pub use matcher::{dedup_matches, match_events, DisasterRegionMatch, DisasterRegionMatcher, MatchOutcome};
pub use region::RegionPolygon;
