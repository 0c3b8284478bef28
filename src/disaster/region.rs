use geo::MultiPolygon;

use crate::types::RegionId;

/// A candidate administrative region. Read-only during matching.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPolygon {
    pub id: RegionId,
    pub name: String,
    pub geometry: MultiPolygon<f64>, // lon/lat, same CRS as event coordinates
}

impl RegionPolygon {
    pub fn new(id: impl Into<RegionId>, name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self { id: id.into(), name: name.into(), geometry }
    }
}
