use thiserror::Error;

use crate::types::{LayerId, PolygonId};

/// Rejected cell extract row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("coverage fraction {coverage} for polygon {polygon_id} is outside [0, 1]")]
    CoverageOutOfRange { polygon_id: PolygonId, coverage: f64 },

    #[error("non-finite cell value for polygon {polygon_id}, layer {layer_id}")]
    NonFiniteValue { polygon_id: PolygonId, layer_id: LayerId },
}

/// A (polygon, layer) group that could not be aggregated. The group is skipped, never zero-filled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("zero total coverage for polygon {polygon_id}, layer {layer_id} ({cells} cells)")]
    ZeroCoverage { polygon_id: PolygonId, layer_id: LayerId, cells: usize },

    #[error("converted aggregate for polygon {polygon_id}, layer {layer_id} is not finite")]
    NonFinite { polygon_id: PolygonId, layer_id: LayerId },
}

impl AggregationError {
    /// The polygon of the skipped group.
    pub fn polygon_id(&self) -> &PolygonId {
        match self {
            Self::ZeroCoverage { polygon_id, .. } | Self::NonFinite { polygon_id, .. } => polygon_id,
        }
    }

    /// The layer of the skipped group.
    pub fn layer_id(&self) -> &LayerId {
        match self {
            Self::ZeroCoverage { layer_id, .. } | Self::NonFinite { layer_id, .. } => layer_id,
        }
    }
}
