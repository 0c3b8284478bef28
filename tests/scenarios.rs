// End-to-end scenarios for zonal aggregation and disaster-to-region matching.

use std::collections::BTreeSet;

use geo::{polygon, MultiPolygon};
use geotally::{
    count_by_region, match_events, to_long, to_wide, AggregationError, CellExtract, DisasterEvent,
    DisasterRegionMatch, RegionId, RegionPolygon, UnitConversion, ZonalAggregator,
};

fn cell(polygon: &str, layer: &str, value: f64, coverage: f64) -> CellExtract {
    CellExtract::new(polygon, layer, value, coverage).unwrap()
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
    MultiPolygon(vec![polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]])
}

fn bavaria() -> Vec<RegionPolygon> {
    vec![
        RegionPolygon::new("Bavaria", "Bavaria", rect(9.0, 47.0, 14.0, 50.5)),
        RegionPolygon::new("UpperBavaria", "Upper Bavaria", rect(10.5, 47.2, 13.0, 49.0)),
        RegionPolygon::new("Saxony", "Saxony", rect(11.8, 50.2, 15.0, 51.7)),
    ]
}

#[test]
fn kelvin_daily_mean_for_partially_covered_polygon() {
    let extracts = [cell("1", "d1", 300.0, 1.0), cell("1", "d1", 280.0, 0.5)];

    let raw = ZonalAggregator::new().aggregate(&extracts);
    assert!((raw.stats[0].value() - 293.333_333_333).abs() < 1e-6);

    let celsius = ZonalAggregator::new()
        .with_conversion(UnitConversion::kelvin_to_celsius())
        .aggregate(&extracts);
    assert!((celsius.stats[0].value() - 20.18).abs() < 0.01);
}

#[test]
fn degenerate_group_is_reported_alongside_partial_output() {
    let extracts = [
        cell("1", "d1", 290.0, 0.3),
        cell("2", "d1", 295.0, 0.0),
        cell("1", "d2", 291.0, 0.6),
    ];
    let agg = ZonalAggregator::new().aggregate(&extracts);
    assert_eq!(agg.stats.len(), 2);
    assert!(matches!(
        &agg.skipped[..],
        [AggregationError::ZeroCoverage { polygon_id, cells: 1, .. }] if polygon_id.as_str() == "2"
    ));
}

#[test]
fn aggregated_stats_survive_pivot_round_trip() {
    let extracts = (0..4)
        .flat_map(|p| (0..3).map(move |d| {
            cell(&format!("P{p}"), &format!("day{d}"), 270.0 + (p * 3 + d) as f64, 0.25 + 0.25 * d as f64)
        }))
        .collect::<Vec<_>>();
    let stats = ZonalAggregator::new().aggregate(&extracts).stats;

    let wide = to_wide(&stats);
    assert_eq!(wide.len(), 4);
    assert_eq!(wide.layers().len(), 3);

    let key = |s: &geotally::ZonalStatistic| {
        (s.polygon_id().to_string(), s.layer_id().to_string(), s.value().to_bits())
    };
    let before = stats.iter().map(key).collect::<BTreeSet<_>>();
    let after = to_long(&wide).iter().map(key).collect::<BTreeSet<_>>();
    assert_eq!(before, after);
}

#[test]
fn nested_regions_are_counted_independently() {
    let regions = bavaria();
    let events = vec![DisasterEvent::new("E1").with_coords(48.1, 11.5)];

    let outcome = match_events(&events, &regions);
    assert_eq!(outcome.matches, vec![
        DisasterRegionMatch::new("E1", "Bavaria"),
        DisasterRegionMatch::new("E1", "UpperBavaria"),
    ]);

    let counts = count_by_region(&outcome.matches, &regions);
    assert_eq!(counts[&RegionId::from("Bavaria")], 1);
    assert_eq!(counts[&RegionId::from("UpperBavaria")], 1);
    assert_eq!(counts[&RegionId::from("Saxony")], 0);
}

#[test]
fn duplicate_event_rows_count_once() {
    let regions = bavaria();
    let events = vec![
        DisasterEvent::new("E1").with_location("Bavaria").with_coords(49.5, 10.0),
        DisasterEvent::new("E1").with_location("Nuremberg").with_coords(49.45, 11.08),
    ];

    let outcome = match_events(&events, &regions);
    assert_eq!(outcome.matches, vec![DisasterRegionMatch::new("E1", "Bavaria")]);
    assert_eq!(count_by_region(&outcome.matches, &regions)[&RegionId::from("Bavaria")], 1);
}

#[test]
fn unlocated_event_is_excluded_and_counted() {
    let regions = bavaria();
    let events = vec![
        DisasterEvent::new("E1").with_location("Unknown valley"),
        DisasterEvent::new("E2").with_coords(51.0, 13.7),
    ];

    let outcome = match_events(&events, &regions);
    assert_eq!(outcome.matches, vec![DisasterRegionMatch::new("E2", "Saxony")]);
    assert_eq!(outcome.unlocated.len(), 1);
    assert_eq!(outcome.unlocated[0].as_str(), "E1");
}

#[test]
fn no_pair_appears_twice() {
    let regions = bavaria();
    let events = (0..20)
        .map(|i| DisasterEvent::new(format!("E{}", i % 4)).with_coords(47.5 + 0.2 * i as f64, 10.0 + 0.2 * i as f64))
        .collect::<Vec<_>>();

    let outcome = match_events(&events, &regions);
    let unique = outcome.matches.iter().collect::<BTreeSet<_>>();
    assert_eq!(unique.len(), outcome.matches.len());

    let counts = count_by_region(&outcome.matches, &regions);
    assert_eq!(counts.len(), regions.len());
}
