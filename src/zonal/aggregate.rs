use ahash::AHashMap;

use crate::types::{LayerId, PolygonId};

use super::{AggregationError, CellExtract, UnitConversion, ZonalStatistic};

/// Running weighted mean for one (polygon, layer) group.
/// Updated incrementally so large values or tiny coverages never overflow or round away.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    mean: f64,
    coverage: f64, // Σ coverage
    min: f64,      // Extremes over covered cells
    max: f64,
    cells: usize,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self { mean: 0.0, coverage: 0.0, min: f64::INFINITY, max: f64::NEG_INFINITY, cells: 0 }
    }
}

impl Accumulator {
    #[inline]
    fn push(&mut self, extract: &CellExtract) {
        self.cells += 1;
        let (value, coverage) = (extract.value(), extract.coverage());
        if coverage <= 0.0 { return }

        self.coverage += coverage;
        let share = coverage / self.coverage;
        self.mean = self.mean * (1.0 - share) + value * share;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Weighted mean, or `None` when no cell carries coverage.
    #[inline]
    fn mean(&self) -> Option<f64> {
        (self.coverage > 0.0).then(|| self.mean.clamp(self.min, self.max))
    }
}

/// Result of an aggregation pass: every group that could be summarized, plus the groups that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub stats: Vec<ZonalStatistic>,
    pub skipped: Vec<AggregationError>,
}

impl Aggregation {
    /// True if no group was skipped.
    #[inline] pub fn is_complete(&self) -> bool { self.skipped.is_empty() }

    /// Abort policy: fail on the first skipped group instead of returning partial output.
    pub fn into_strict(self) -> Result<Vec<ZonalStatistic>, AggregationError> {
        match self.skipped.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.stats),
        }
    }
}

/// Reduces cell extracts to one coverage-weighted mean per (polygon, layer).
#[derive(Debug, Clone, Default)]
pub struct ZonalAggregator {
    conversion: UnitConversion,
}

impl ZonalAggregator {
    pub fn new() -> Self { Self::default() }

    /// Apply `conversion` to each aggregated value (never to raw cell values).
    pub fn with_conversion(mut self, conversion: UnitConversion) -> Self {
        self.conversion = conversion;
        self
    }

    #[inline] pub fn conversion(&self) -> UnitConversion { self.conversion }

    /// Group `extracts` by (polygon, layer) and compute Σ(v·f) / Σf for each group.
    /// Groups with zero total coverage, or whose converted value overflows, are reported in `skipped`.
    /// Output is sorted by (polygon, layer), though callers should not depend on it.
    pub fn aggregate(&self, extracts: &[CellExtract]) -> Aggregation {
        let mut groups: AHashMap<(&PolygonId, &LayerId), Accumulator> = AHashMap::new();
        for extract in extracts {
            groups.entry((extract.polygon_id(), extract.layer_id()))
                .or_default()
                .push(extract);
        }

        let mut groups = groups.into_iter().collect::<Vec<_>>();
        groups.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        let mut result = Aggregation::default();
        for ((polygon_id, layer_id), acc) in groups {
            let Some(mean) = acc.mean() else {
                result.skipped.push(AggregationError::ZeroCoverage {
                    polygon_id: polygon_id.clone(),
                    layer_id: layer_id.clone(),
                    cells: acc.cells,
                });
                continue;
            };

            // Only the conversion can leave the finite range.
            let value = self.conversion.apply(mean);
            if !value.is_finite() {
                result.skipped.push(AggregationError::NonFinite {
                    polygon_id: polygon_id.clone(),
                    layer_id: layer_id.clone(),
                });
                continue;
            }

            result.stats.push(ZonalStatistic::new(polygon_id.clone(), layer_id.clone(), value));
        }
        result
    }
}

/// Aggregate without unit conversion.
pub fn aggregate(extracts: &[CellExtract]) -> Aggregation {
    ZonalAggregator::default().aggregate(extracts)
}

/// Sort statistics into display order (polygon, then layer).
pub fn sort_stats(stats: &mut [ZonalStatistic]) {
    stats.sort_by(|a, b| (a.polygon_id(), a.layer_id()).cmp(&(b.polygon_id(), b.layer_id())));
}
