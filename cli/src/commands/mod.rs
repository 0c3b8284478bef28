pub mod matching;
pub mod zonal;

use std::path::Path;

use anyhow::{bail, Result};

/// Reject "-" as an output path; results are always written to files.
pub(crate) fn require_file_output(path: &Path) -> Result<()> {
    if path == Path::new("-") { bail!("stdout is not supported."); }
    Ok(())
}
