use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::RegionId;

use super::{DisasterRegionMatch, RegionPolygon};

/// Tally matches per region. Every region in `regions` gets an entry, zero if nothing matched;
/// matches naming a region outside `regions` are ignored.
pub fn count_by_region(matches: &[DisasterRegionMatch], regions: &[RegionPolygon]) -> BTreeMap<RegionId, usize> {
    let mut counts = regions.iter()
        .map(|region| (region.id.clone(), 0))
        .collect::<BTreeMap<_, _>>();

    for m in matches {
        if let Some(count) = counts.get_mut(&m.region_id) { *count += 1; }
    }
    counts
}

/// Headline numbers of a matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub located: usize,         // Event rows with coordinates
    pub unlocated: usize,       // Distinct events without coordinates
    pub matched_events: usize,  // Distinct events inside at least one region
    pub matches: usize,         // Deduplicated (event, region) pairs
    pub skipped_regions: usize,
}

#[cfg(test)]
mod tests {
    use geo::MultiPolygon;

    use super::*;

    fn region(id: &str) -> RegionPolygon {
        RegionPolygon::new(id, id, MultiPolygon(vec![]))
    }

    #[test]
    fn includes_unmatched_regions() {
        let regions = vec![region("DE1"), region("DE2"), region("DE3")];
        let matches = vec![
            DisasterRegionMatch::new("E1", "DE2"),
            DisasterRegionMatch::new("E2", "DE2"),
            DisasterRegionMatch::new("E2", "DE1"),
        ];
        let counts = count_by_region(&matches, &regions);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&RegionId::from("DE1")], 1);
        assert_eq!(counts[&RegionId::from("DE2")], 2);
        assert_eq!(counts[&RegionId::from("DE3")], 0);
    }

    #[test]
    fn ignores_unknown_regions() {
        let regions = vec![region("DE1")];
        let counts = count_by_region(&[DisasterRegionMatch::new("E1", "FR1")], &regions);
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![(RegionId::from("DE1"), 0)]);
    }
}
