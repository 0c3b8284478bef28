use ahash::AHashSet;

use crate::{geom::{validate_shape, RegionIndex}, types::{EventId, RegionId}};

use super::{Coordinates, DisasterEvent, MatchError, MatchSummary, RegionPolygon};

/// An event located inside a region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisasterRegionMatch {
    pub event_id: EventId,
    pub region_id: RegionId,
}

impl DisasterRegionMatch {
    pub fn new(event_id: impl Into<EventId>, region_id: impl Into<RegionId>) -> Self {
        Self { event_id: event_id.into(), region_id: region_id.into() }
    }
}

/// Result of a matching pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// Deduplicated matches, at most one per (event, region).
    pub matches: Vec<DisasterRegionMatch>,
    /// Events without coordinates (distinct ids, first-seen order).
    pub unlocated: Vec<EventId>,
    /// Regions excluded from the scan.
    pub skipped: Vec<MatchError>,
}

impl MatchOutcome {
    pub fn summary(&self, located: usize) -> MatchSummary {
        MatchSummary {
            located,
            unlocated: self.unlocated.len(),
            matched_events: self.matches.iter().map(|m| &m.event_id).collect::<AHashSet<_>>().len(),
            matches: self.matches.len(),
            skipped_regions: self.skipped.len(),
        }
    }
}

/// Point-in-region matcher over a fixed region collection.
/// Regions are validated once up front; invalid ones are reported and never tested.
#[derive(Debug)]
pub struct DisasterRegionMatcher<'a> {
    regions: &'a [RegionPolygon],
    index: RegionIndex<'a>,
    invalid: Vec<MatchError>,
}

impl<'a> DisasterRegionMatcher<'a> {
    pub fn new(regions: &'a [RegionPolygon]) -> Self {
        let mut invalid = Vec::new();
        let index = RegionIndex::new(regions.iter().enumerate()
            .filter(|(_, region)| match validate_shape(&region.geometry) {
                Ok(()) => true,
                Err(source) => {
                    invalid.push(MatchError::InvalidGeometry { region_id: region.id.clone(), source });
                    false
                }
            })
            .map(|(i, region)| (i, &region.geometry)));

        Self { regions, index, invalid }
    }

    /// Regions that failed validation and are excluded from every containment test.
    #[inline] pub fn invalid_regions(&self) -> &[MatchError] { &self.invalid }

    /// Number of regions taking part in containment tests.
    #[inline] pub fn num_valid(&self) -> usize { self.index.len() }

    /// Every valid region containing `coords`, in input order. Overlapping levels are all returned.
    pub fn contained_regions(&self, coords: Coordinates) -> Vec<&'a RegionPolygon> {
        let regions = self.regions;
        self.index.containing(coords.to_point())
            .into_iter()
            .map(|i| &regions[i])
            .collect()
    }

    /// Match every located event against the regions, then deduplicate on (event, region).
    pub fn match_events(&self, events: &[DisasterEvent]) -> MatchOutcome {
        let raw = events.iter()
            .filter_map(|event| event.coords.map(|coords| (event, coords)))
            .flat_map(|(event, coords)| self.contained_regions(coords)
                .into_iter()
                .map(move |region| DisasterRegionMatch::new(event.id.clone(), region.id.clone())))
            .collect::<Vec<_>>();

        let mut seen = AHashSet::new();
        let unlocated = events.iter()
            .filter(|event| !event.is_located())
            .filter(|&event| seen.insert(&event.id))
            .map(|event| event.id.clone())
            .collect();

        MatchOutcome {
            // Dedup runs only once the whole scan is collected.
            matches: dedup_matches(raw),
            unlocated,
            skipped: self.invalid.clone(),
        }
    }
}

/// Match `events` against `regions` in one call.
pub fn match_events(events: &[DisasterEvent], regions: &[RegionPolygon]) -> MatchOutcome {
    DisasterRegionMatcher::new(regions).match_events(events)
}

/// Collapse repeated (event, region) pairs, keeping first occurrences in order.
/// Keyed on region id, so distinct regions sharing a name stay distinct.
pub fn dedup_matches(matches: impl IntoIterator<Item = DisasterRegionMatch>) -> Vec<DisasterRegionMatch> {
    let mut seen = AHashSet::new();
    matches.into_iter()
        .filter(|m| seen.insert((m.event_id.clone(), m.region_id.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]])
    }

    fn regions() -> Vec<RegionPolygon> {
        vec![
            RegionPolygon::new("DE2", "Bavaria", rect(9.0, 47.0, 14.0, 50.5)),
            RegionPolygon::new("DE21", "Upper Bavaria", rect(10.5, 47.2, 13.0, 49.0)),
            RegionPolygon::new("DEA", "North Rhine-Westphalia", rect(5.8, 50.3, 9.5, 52.5)),
        ]
    }

    #[test]
    fn nested_regions_each_match() {
        let regions = regions();
        let matcher = DisasterRegionMatcher::new(&regions);
        let ids = matcher.contained_regions(Coordinates { lat: 48.1, lng: 11.5 })
            .into_iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["DE2", "DE21"]);
    }

    #[test]
    fn repeated_rows_collapse() {
        let events = vec![
            DisasterEvent::new("E1").with_location("Bavaria").with_coords(49.5, 10.0),
            DisasterEvent::new("E1").with_location("Franconia").with_coords(49.9, 10.9),
        ];
        let outcome = match_events(&events, &regions());
        assert_eq!(outcome.matches, vec![DisasterRegionMatch::new("E1", "DE2")]);
    }

    #[test]
    fn dedup_keeps_distinct_regions_with_same_name() {
        let raw = vec![
            DisasterRegionMatch::new("E1", "A"),
            DisasterRegionMatch::new("E1", "B"),
            DisasterRegionMatch::new("E1", "A"),
            DisasterRegionMatch::new("E2", "A"),
        ];
        assert_eq!(dedup_matches(raw), vec![
            DisasterRegionMatch::new("E1", "A"),
            DisasterRegionMatch::new("E1", "B"),
            DisasterRegionMatch::new("E2", "A"),
        ]);
    }

    #[test]
    fn invalid_region_is_skipped_not_fatal() {
        let mut regions = regions();
        regions.push(RegionPolygon::new("BAD", "Broken", MultiPolygon(vec![])));
        let events = vec![DisasterEvent::new("E1").with_coords(51.2, 7.0)];

        let outcome = match_events(&events, &regions);
        assert_eq!(outcome.matches, vec![DisasterRegionMatch::new("E1", "DEA")]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].region_id().as_str(), "BAD");
    }

    #[test]
    fn unlocated_events_are_listed_once() {
        let events = vec![
            DisasterEvent::new("E1").with_location("somewhere"),
            DisasterEvent::new("E1").with_location("somewhere else"),
            DisasterEvent::new("E2").with_coords(0.0, 0.0),
        ];
        let outcome = match_events(&events, &regions());
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.unlocated, vec![EventId::from("E1")]);

        let summary = outcome.summary(1);
        assert_eq!(summary.unlocated, 1);
        assert_eq!(summary.matched_events, 0);
    }
}
