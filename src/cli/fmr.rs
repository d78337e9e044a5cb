use anyhow::Result;
use log::{info, warn};
use std::path::PathBuf;

use rawxrd::fmr::convert_spc;
use rawxrd::report::{ConversionReport, FileOutcome};

use super::config::Config;

/// Convert .spc/.par pairs to CSV sweeps
pub fn run(files: Vec<PathBuf>, config_path: Option<PathBuf>, overwrite: bool) -> Result<()> {
    let file_config = Config::load(config_path.as_deref())?.fmr;
    let overwrite = overwrite || file_config.overwrite.unwrap_or(false);

    let mut report = ConversionReport::new();
    for file in &files {
        if !file.exists() {
            warn!("{} does not exist", file.display());
            report.add(FileOutcome::skipped(file, "file does not exist"));
            continue;
        }

        info!("Converting {}", file.display());
        let outcome = match convert_spc(file, overwrite) {
            Ok(stats) => match stats.written.first() {
                Some(first) => FileOutcome::converted(file, first, stats.point_count),
                None => FileOutcome::skipped(file, "all outputs already exist"),
            },
            Err(e) => {
                warn!("{} failed: {}", file.display(), e);
                FileOutcome::failed(file, e)
            }
        };
        report.add(outcome);
    }

    println!("{}", report.format_colored());

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} file(s) failed to convert",
            report.failure_count(),
            files.len()
        );
    }

    Ok(())
}
