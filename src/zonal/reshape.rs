//! Pivots between the tall (polygon, layer, value) form and the wide form used for reporting.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, prelude::{Column, DataType, NamedFrom}, series::Series};

use crate::types::{LayerId, PolygonId};

use super::ZonalStatistic;

/// One row per polygon, one column per layer. Missing (polygon, layer) cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    layers: Vec<LayerId>,                       // Sorted column order
    rows: Vec<(PolygonId, Vec<Option<f64>>)>,   // Sorted by polygon id
}

impl WideTable {
    /// Column (layer) names, in order.
    #[inline] pub fn layers(&self) -> &[LayerId] { &self.layers }

    /// Number of polygon rows.
    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Polygon ids, in row order.
    pub fn polygons(&self) -> impl Iterator<Item = &PolygonId> + '_ {
        self.rows.iter().map(|(id, _)| id)
    }

    /// Look up the row for a polygon by its id text.
    pub fn row(&self, polygon_id: &str) -> Option<&[Option<f64>]> {
        self.rows.binary_search_by(|(id, _)| id.as_str().cmp(polygon_id))
            .ok()
            .map(|i| self.rows[i].1.as_slice())
    }

    /// Value of a single (polygon, layer) cell.
    pub fn get(&self, polygon_id: &str, layer_id: &str) -> Option<f64> {
        let col = self.layers.binary_search_by(|l| l.as_str().cmp(layer_id)).ok()?;
        self.row(polygon_id)?[col]
    }

    /// Convert to a DataFrame: `polygon_id` (String) followed by one Float64 column per layer.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.layers.len() + 1);
        columns.push(Series::new(
            "polygon_id".into(),
            self.rows.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>(),
        ).into());

        for (col, layer) in self.layers.iter().enumerate() {
            ensure!(layer.as_str() != "polygon_id", "[zonal::reshape] layer name collides with polygon_id column");
            columns.push(Series::new(
                layer.as_str().into(),
                self.rows.iter().map(|(_, values)| values[col]).collect::<Vec<_>>(),
            ).into());
        }

        DataFrame::new(columns).context("[zonal::reshape] Failed to build wide DataFrame")
    }

    /// Inverse of [`WideTable::to_dataframe`]: the first column holds polygon ids, every other column is a layer.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        ensure!(df.width() >= 1, "[zonal::reshape] wide table needs a polygon_id column");

        let names = df.get_column_names_owned();
        let ids = df.column(names[0].as_str())?.cast(&DataType::String)?;
        let ids = ids.str()?.into_iter()
            .map(|id| id.map(PolygonId::new).context("[zonal::reshape] null polygon_id in wide table"))
            .collect::<Result<Vec<_>>>()?;

        let mut cells: Vec<(LayerId, Vec<Option<f64>>)> = Vec::with_capacity(names.len() - 1);
        for name in &names[1..] {
            let values = df.column(name.as_str())?.cast(&DataType::Float64)?;
            cells.push((LayerId::new(name.as_str()), values.f64()?.into_iter().collect()));
        }

        let stats = ids.iter().enumerate()
            .flat_map(|(row, polygon)| cells.iter()
                .filter_map(move |(layer, values)| {
                    values[row].map(|v| ZonalStatistic::new(polygon.clone(), layer.clone(), v))
                }))
            .collect::<Vec<_>>();

        let mut table = to_wide(&stats);

        // Keep all-null layer columns and polygons so the schema survives the round trip.
        for (layer, _) in &cells {
            if table.layers.binary_search(layer).is_err() {
                table.insert_layer(layer.clone());
            }
        }
        for polygon in ids {
            if let Err(pos) = table.rows.binary_search_by(|(id, _)| id.cmp(&polygon)) {
                table.rows.insert(pos, (polygon, vec![None; table.layers.len()]));
            }
        }
        Ok(table)
    }

    fn insert_layer(&mut self, layer: LayerId) {
        let pos = self.layers.binary_search(&layer).unwrap_or_else(|pos| pos);
        self.layers.insert(pos, layer);
        for (_, values) in &mut self.rows { values.insert(pos, None); }
    }
}

/// Long-to-wide pivot. If a (polygon, layer) pair repeats, the last value wins.
pub fn to_wide(stats: &[ZonalStatistic]) -> WideTable {
    let layers = stats.iter()
        .map(|s| s.layer_id())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();

    let mut rows: BTreeMap<&PolygonId, Vec<Option<f64>>> = BTreeMap::new();
    for stat in stats {
        // Layers come from the same stats, so the search always succeeds.
        if let Ok(col) = layers.binary_search(stat.layer_id()) {
            rows.entry(stat.polygon_id())
                .or_insert_with(|| vec![None; layers.len()])[col] = Some(stat.value());
        }
    }

    WideTable {
        rows: rows.into_iter().map(|(id, values)| (id.clone(), values)).collect(),
        layers,
    }
}

/// Wide-to-long pivot, dropping empty cells.
pub fn to_long(wide: &WideTable) -> Vec<ZonalStatistic> {
    wide.rows.iter()
        .flat_map(|(polygon, values)| wide.layers.iter().zip(values)
            .filter_map(move |(layer, value)| {
                value.map(|v| ZonalStatistic::new(polygon.clone(), layer.clone(), v))
            }))
        .collect()
}
