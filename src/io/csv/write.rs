//! CSV writing operations.

use std::{collections::BTreeMap, fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

use crate::{
    disaster::DisasterRegionMatch,
    types::RegionId,
    zonal::{WideTable, ZonalStatistic},
};

/// Write a DataFrame to a CSV file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write zonal statistics in long form: `polygon_id, layer_id, value`.
pub fn write_stats_csv(stats: &[ZonalStatistic], path: &Path) -> Result<()> {
    let mut df = DataFrame::new(vec![
        Series::new("polygon_id".into(), stats.iter().map(|s| s.polygon_id().as_str()).collect::<Vec<_>>()).into(),
        Series::new("layer_id".into(), stats.iter().map(|s| s.layer_id().as_str()).collect::<Vec<_>>()).into(),
        Series::new("value".into(), stats.iter().map(|s| s.value()).collect::<Vec<_>>()).into(),
    ])?;
    write_csv(&mut df, path)
}

/// Write zonal statistics in wide form: `polygon_id` then one column per layer.
pub fn write_wide_csv(wide: &WideTable, path: &Path) -> Result<()> {
    write_csv(&mut wide.to_dataframe()?, path)
}

/// Write per-region event counts: `region_id, events`.
pub fn write_counts_csv(counts: &BTreeMap<RegionId, usize>, path: &Path) -> Result<()> {
    let (ids, events) = counts.iter()
        .map(|(id, count)| (id.as_str(), *count as u64))
        .unzip::<_, _, Vec<_>, Vec<_>>();

    let mut df = DataFrame::new(vec![
        Series::new("region_id".into(), ids).into(),
        Series::new("events".into(), events).into(),
    ])?;
    write_csv(&mut df, path)
}

/// Write deduplicated matches: `event_id, region_id`.
pub fn write_matches_csv(matches: &[DisasterRegionMatch], path: &Path) -> Result<()> {
    let (events, regions) = matches.iter()
        .map(|m| (m.event_id.as_str(), m.region_id.as_str()))
        .unzip::<_, _, Vec<_>, Vec<_>>();

    let mut df = DataFrame::new(vec![
        Series::new("event_id".into(), events).into(),
        Series::new("region_id".into(), regions).into(),
    ])?;
    write_csv(&mut df, path)
}
