use std::path::PathBuf;

use anyhow::{Context, Result};
use geotally::{read_extracts_csv, sort_stats, to_wide, write_stats_csv, write_wide_csv, UnitConversion, ZonalConfig};

use crate::cli::{Cli, ZonalArgs};

pub fn run(cli: &Cli, args: &ZonalArgs) -> Result<()> {
    let out_path: PathBuf = args.output.clone().unwrap_or("./zonal.csv".into());
    super::require_file_output(&out_path)?;

    // Flags override the config file.
    let mut config = match &args.config {
        Some(path) => ZonalConfig::read_from_json(path)?,
        None => ZonalConfig::default(),
    };
    if args.kelvin { config.conversion = UnitConversion::kelvin_to_celsius(); }
    config.strict |= args.strict;
    config.wide |= args.wide;

    if cli.verbose > 0 { eprintln!("[zonal] reading extracts from {}", args.extracts.display()); }
    let extracts = read_extracts_csv(&args.extracts)?;

    if cli.verbose > 0 {
        eprintln!("[zonal] aggregating {} cells (scale={}, offset={})",
            extracts.len(), config.conversion.scale, config.conversion.offset);
    }
    let aggregation = config.aggregator().aggregate(&extracts);

    for err in &aggregation.skipped {
        if cli.verbose > 0 { eprintln!("Warning: skipped group: {err}"); }
    }
    let skipped = aggregation.skipped.len();
    let mut stats = if config.strict {
        aggregation.into_strict().context("[zonal] aborting on degenerate group (--strict)")?
    } else {
        aggregation.stats
    };
    sort_stats(&mut stats);

    if cli.verbose > 0 {
        eprintln!("[zonal] writing {} statistics ({} groups skipped) to {}", stats.len(), skipped, out_path.display());
    }
    if config.wide {
        write_wide_csv(&to_wide(&stats), &out_path)?;
    } else {
        write_stats_csv(&stats, &out_path)?;
    }

    Ok(())
}
