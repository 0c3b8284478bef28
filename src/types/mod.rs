mod ids;

pub use ids::{EventId, LayerId, PolygonId, RegionId};
