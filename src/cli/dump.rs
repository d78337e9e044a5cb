use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use rawxrd::export::to_json_pretty;
use rawxrd::raw4::RawFile;

/// Print the decoded structure of a .raw file as JSON
pub fn run(file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let raw = RawFile::open(&file).with_context(|| format!("Failed to decode {}", file.display()))?;
    let json = to_json_pretty(&raw).context("Failed to serialize structure")?;

    match output {
        Some(out) => {
            std::fs::write(&out, json)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!("Wrote structure of {} to {}", file.display(), out.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
