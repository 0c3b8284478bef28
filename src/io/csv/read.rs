//! CSV reading operations.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::{bail, Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, DataType, Field, Schema}};

use crate::{disaster::{Coordinates, DisasterEvent}, zonal::{CellExtract, WideTable}};

/// Read a CSV with a header row, forcing `id_columns` to String so leading zeros survive.
fn read_csv(path: &Path, id_columns: &[&str]) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    let schema = Arc::new(Schema::from_iter(
        id_columns.iter().map(|name| Field::new((*name).into(), DataType::String))
    ));
    CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(schema))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

fn str_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let col = df.column(name)
        .with_context(|| format!("[io::csv::read] Missing column '{name}'"))?
        .cast(&DataType::String)?;
    Ok(col.str()?.into_iter().map(|s| s.map(|s| s.trim().to_string())).collect())
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df.column(name)
        .with_context(|| format!("[io::csv::read] Missing column '{name}'"))?
        .cast(&DataType::Float64)
        .with_context(|| format!("[io::csv::read] Column '{name}' is not numeric"))?;
    Ok(col.f64()?.into_iter().collect())
}

fn i32_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>> {
    let col = df.column(name)
        .with_context(|| format!("[io::csv::read] Missing column '{name}'"))?
        .cast(&DataType::Int32)
        .with_context(|| format!("[io::csv::read] Column '{name}' is not an integer"))?;
    Ok(col.i32()?.into_iter().collect())
}

/// A column that may be absent from the file; absent reads as all-null.
fn optional_str_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    if df.schema().contains(name) { str_column(df, name) } else { Ok(vec![None; df.height()]) }
}

/// Read cell extracts with columns `polygon_id, layer_id, value, coverage`.
/// Every row must be complete and valid; the first bad row fails the read.
pub fn read_extracts_csv(path: &Path) -> Result<Vec<CellExtract>> {
    let df = read_csv(path, &["polygon_id", "layer_id"])?;

    let polygons = str_column(&df, "polygon_id")?;
    let layers = str_column(&df, "layer_id")?;
    let values = f64_column(&df, "value")?;
    let coverages = f64_column(&df, "coverage")?;

    polygons.into_iter()
        .zip(layers)
        .zip(values.into_iter().zip(coverages))
        .enumerate()
        .map(|(row, ((polygon, layer), (value, coverage)))| {
            let (Some(polygon), Some(layer), Some(value), Some(coverage)) = (polygon, layer, value, coverage) else {
                bail!("[io::csv::read] Incomplete extract at row {}", row + 1);
            };
            CellExtract::new(polygon, layer, value, coverage)
                .with_context(|| format!("[io::csv::read] Invalid extract at row {}", row + 1))
        })
        .collect()
}

/// Read disaster events with columns `event_id, lat, lng` and optionally
/// `year, subgroup, country, location`. Rows with both coordinates empty are unlocated events.
pub fn read_events_csv(path: &Path) -> Result<Vec<DisasterEvent>> {
    let df = read_csv(path, &["event_id"])?;

    let ids = str_column(&df, "event_id")?;
    let lats = f64_column(&df, "lat")?;
    let lngs = f64_column(&df, "lng")?;
    let years = if df.schema().contains("year") { i32_column(&df, "year")? } else { vec![None; df.height()] };
    let subgroups = optional_str_column(&df, "subgroup")?;
    let countries = optional_str_column(&df, "country")?;
    let locations = optional_str_column(&df, "location")?;

    (0..df.height())
        .map(|row| {
            let Some(id) = ids[row].as_deref() else {
                bail!("[io::csv::read] Missing event_id at row {}", row + 1);
            };
            let coords = match (lats[row], lngs[row]) {
                (None, None) => None,
                (Some(lat), Some(lng)) => Some(Coordinates::checked(lat, lng).with_context(|| {
                    format!("[io::csv::read] Coordinates ({lat}, {lng}) out of range at row {}", row + 1)
                })?),
                _ => bail!("[io::csv::read] Only one of lat/lng given at row {}", row + 1),
            };
            Ok(DisasterEvent {
                id: id.into(),
                year: years[row],
                subgroup: subgroups[row].clone().unwrap_or_default(),
                country: countries[row].clone().unwrap_or_default(),
                location: locations[row].clone().unwrap_or_default(),
                coords,
            })
        })
        .collect()
}

/// Read a wide statistics table: `polygon_id` then one numeric column per layer.
pub fn read_wide_csv(path: &Path) -> Result<WideTable> {
    let df = read_csv(path, &["polygon_id"])?;
    WideTable::from_dataframe(&df)
        .with_context(|| format!("[io::csv::read] Invalid wide statistics table in {}", path.display()))
}
