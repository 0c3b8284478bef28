use crate::types::{LayerId, PolygonId};

use super::ExtractError;

/// One raster cell intersecting one polygon in one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CellExtract {
    polygon_id: PolygonId,
    layer_id: LayerId,
    value: f64,
    coverage: f64, // Fraction of the cell's area inside the polygon
}

impl CellExtract {
    /// Construct an extract row, rejecting non-finite values and coverage outside [0, 1].
    pub fn new(
        polygon_id: impl Into<PolygonId>,
        layer_id: impl Into<LayerId>,
        value: f64,
        coverage: f64,
    ) -> Result<Self, ExtractError> {
        let polygon_id = polygon_id.into();
        let layer_id = layer_id.into();

        if !(0.0..=1.0).contains(&coverage) {
            return Err(ExtractError::CoverageOutOfRange { polygon_id, coverage });
        }
        if !value.is_finite() {
            return Err(ExtractError::NonFiniteValue { polygon_id, layer_id });
        }

        Ok(Self { polygon_id, layer_id, value, coverage })
    }

    #[inline] pub fn polygon_id(&self) -> &PolygonId { &self.polygon_id }

    #[inline] pub fn layer_id(&self) -> &LayerId { &self.layer_id }

    #[inline] pub fn value(&self) -> f64 { self.value }

    #[inline] pub fn coverage(&self) -> f64 { self.coverage }
}

/// Coverage-weighted summary of one polygon in one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonalStatistic {
    polygon_id: PolygonId,
    layer_id: LayerId,
    value: f64,
}

impl ZonalStatistic {
    pub fn new(polygon_id: impl Into<PolygonId>, layer_id: impl Into<LayerId>, value: f64) -> Self {
        Self { polygon_id: polygon_id.into(), layer_id: layer_id.into(), value }
    }

    #[inline] pub fn polygon_id(&self) -> &PolygonId { &self.polygon_id }

    #[inline] pub fn layer_id(&self) -> &LayerId { &self.layer_id }

    #[inline] pub fn value(&self) -> f64 { self.value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_coverage() {
        assert!(CellExtract::new("1", "d1", 280.0, 0.0).is_ok());
        assert!(CellExtract::new("1", "d1", 280.0, 1.0).is_ok());
    }

    #[test]
    fn rejects_coverage_out_of_range() {
        let err = CellExtract::new("1", "d1", 280.0, 1.5).unwrap_err();
        assert!(matches!(err, ExtractError::CoverageOutOfRange { coverage, .. } if coverage == 1.5));
        assert!(CellExtract::new("1", "d1", 280.0, -0.1).is_err());
        assert!(CellExtract::new("1", "d1", 280.0, f64::NAN).is_err());
    }

    #[test]
    fn rejects_non_finite_value() {
        let err = CellExtract::new("1", "d1", f64::INFINITY, 0.5).unwrap_err();
        assert!(matches!(err, ExtractError::NonFiniteValue { .. }));
    }
}
