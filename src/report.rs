use std::collections::BTreeMap;

use anyhow::{ensure, Context, Result};
use polars::{frame::DataFrame, prelude::{Column, NamedFrom}, series::Series};
use serde_json::{json, Map, Value};

use crate::{disaster::RegionPolygon, io::feature_collection, types::RegionId, zonal::WideTable};

/// Per-region table handed to the mapping collaborator: event counts, plus zonal
/// statistics joined on `region_id == polygon_id` when available.
#[derive(Debug, Clone)]
pub struct RegionReport<'a> {
    regions: &'a [RegionPolygon],
    counts: &'a BTreeMap<RegionId, usize>,
    stats: Option<&'a WideTable>,
}

impl<'a> RegionReport<'a> {
    pub fn new(regions: &'a [RegionPolygon], counts: &'a BTreeMap<RegionId, usize>) -> Self {
        Self { regions, counts, stats: None }
    }

    pub fn with_statistics(mut self, stats: &'a WideTable) -> Self {
        self.stats = Some(stats);
        self
    }

    #[inline]
    fn count(&self, region: &RegionPolygon) -> u64 {
        self.counts.get(&region.id).copied().unwrap_or(0) as u64
    }

    #[inline]
    fn layer_value(&self, region: &RegionPolygon, col: usize) -> Option<f64> {
        self.stats?.row(region.id.as_str())?[col]
    }

    /// Columns: `region_id, name, events`, then one column per statistics layer.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = vec![
            Series::new("region_id".into(), self.regions.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()).into(),
            Series::new("name".into(), self.regions.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()).into(),
            Series::new("events".into(), self.regions.iter().map(|r| self.count(r)).collect::<Vec<_>>()).into(),
        ];

        for (col, layer) in self.stats.map(|s| s.layers()).unwrap_or_default().iter().enumerate() {
            ensure!(
                !["region_id", "name", "events"].contains(&layer.as_str()),
                "[report] layer '{layer}' collides with a report column"
            );
            columns.push(Series::new(
                layer.as_str().into(),
                self.regions.iter().map(|r| self.layer_value(r, col)).collect::<Vec<_>>(),
            ).into());
        }

        DataFrame::new(columns).context("[report] Failed to build region report")
    }

    /// GeoJSON FeatureCollection with the same columns as feature properties.
    pub fn to_geojson(&self) -> Value {
        let layers = self.stats.map(|s| s.layers()).unwrap_or_default();
        feature_collection(self.regions.iter().map(|region| {
            let mut properties = Map::new();
            properties.insert("name".into(), json!(region.name));
            properties.insert("events".into(), json!(self.count(region)));
            for (col, layer) in layers.iter().enumerate() {
                properties.insert(layer.to_string(), json!(self.layer_value(region, col)));
            }
            (region.id.as_str(), &region.geometry, properties)
        }))
    }
}
