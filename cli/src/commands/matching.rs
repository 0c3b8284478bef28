use std::path::PathBuf;

use anyhow::Result;
use geotally::{
    count_by_region, read_events_csv, read_regions_shapefile, read_wide_csv, write_counts_csv,
    write_geojson, write_matches_csv, DisasterRegionMatcher, EventFilter, RegionReport,
};

use crate::cli::{Cli, MatchArgs};

pub fn run(cli: &Cli, args: &MatchArgs) -> Result<()> {
    let out_path: PathBuf = args.output.clone().unwrap_or("./matches.csv".into());
    super::require_file_output(&out_path)?;
    for path in [&args.counts, &args.geojson].into_iter().flatten() {
        super::require_file_output(path)?;
    }

    if cli.verbose > 0 { eprintln!("[match] reading events from {}", args.events.display()); }
    let events = read_events_csv(&args.events)?;

    let filter = EventFilter {
        countries: args.country.clone(),
        subgroups: args.subgroup.clone(),
        years: match (args.from, args.to) {
            (None, None) => None,
            (from, to) => Some(from.unwrap_or(i32::MIN)..=to.unwrap_or(i32::MAX)),
        },
    };
    let events = if filter.is_empty() { events } else { filter.apply(&events) };

    if cli.verbose > 0 { eprintln!("[match] reading regions from {}", args.regions.display()); }
    let regions = read_regions_shapefile(&args.regions, &args.id_field, args.name_field.as_deref())?;

    let matcher = DisasterRegionMatcher::new(&regions);
    for err in matcher.invalid_regions() {
        if cli.verbose > 0 { eprintln!("Warning: {err}"); }
    }

    if cli.verbose > 0 {
        eprintln!("[match] testing {} events against {} regions", events.len(), matcher.num_valid());
    }
    let outcome = matcher.match_events(&events);
    let counts = count_by_region(&outcome.matches, &regions);

    if cli.verbose > 0 {
        let summary = outcome.summary(events.iter().filter(|e| e.is_located()).count());
        eprintln!(
            "[match] located={} unlocated={} matched_events={} matches={} skipped_regions={}",
            summary.located, summary.unlocated, summary.matched_events, summary.matches, summary.skipped_regions,
        );
        if cli.verbose > 1 {
            for id in &outcome.unlocated { eprintln!("[match] unlocated event {id}"); }
        }
    }

    if cli.verbose > 0 { eprintln!("[match] writing matches to {}", out_path.display()); }
    write_matches_csv(&outcome.matches, &out_path)?;

    if let Some(path) = &args.counts {
        if cli.verbose > 0 { eprintln!("[match] writing counts to {}", path.display()); }
        write_counts_csv(&counts, path)?;
    }

    if let Some(path) = &args.geojson {
        let stats = args.stats.as_deref().map(read_wide_csv).transpose()?;
        let mut report = RegionReport::new(&regions, &counts);
        if let Some(stats) = &stats { report = report.with_statistics(stats); }

        if cli.verbose > 0 { eprintln!("[match] writing region report to {}", path.display()); }
        write_geojson(&report.to_geojson(), path)?;
    }

    Ok(())
}
