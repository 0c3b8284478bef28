use thiserror::Error;

use crate::{geom::GeometryError, types::RegionId};

/// A region that was left out of containment testing. The scan continues without it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("region {region_id} has invalid geometry: {source}")]
    InvalidGeometry {
        region_id: RegionId,
        #[source]
        source: GeometryError,
    },
}

impl MatchError {
    /// The skipped region.
    pub fn region_id(&self) -> &RegionId {
        match self {
            Self::InvalidGeometry { region_id, .. } => region_id,
        }
    }
}
