use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::zonal::{UnitConversion, ZonalAggregator};

/// JSON run configuration for a zonal aggregation, e.g.
/// `{ "conversion": { "offset": -273.15 }, "strict": false, "wide": true }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZonalConfig {
    /// Post-aggregation unit conversion.
    pub conversion: UnitConversion,
    /// Abort on the first degenerate group instead of skipping it.
    pub strict: bool,
    /// Write one row per polygon with one column per layer.
    pub wide: bool,
}

impl ZonalConfig {
    /// Read a configuration from a JSON file.
    pub fn read_from_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("[config] Invalid zonal config in {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Aggregator configured with this run's conversion.
    pub fn aggregator(&self) -> ZonalAggregator {
        ZonalAggregator::new().with_conversion(self.conversion)
    }
}
