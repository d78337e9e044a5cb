//! RAW to ASC conversion pipeline.
//!
//! Each input is read, decoded and exported independently, so a batch can be
//! spread across threads (with the `parallel` feature) without any shared
//! state between files.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::export::{asc_path, save_asc, ExportError};
use crate::quantities::{XUnit, YUnit};
use crate::raw4::{Raw4Error, RawFile};
use crate::report::{ConversionReport, FileOutcome};

/// Errors that can occur while converting one file
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Error decoding the RAW file
    #[error("RAW decode error: {0}")]
    Raw4Error(#[from] Raw4Error),

    /// Error deriving or writing the output
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),
}

/// Configuration for RAW to ASC conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Angular axis units
    pub x_unit: XUnit,
    /// Intensity units
    pub y_unit: YUnit,
    /// Replace existing `.asc` files
    pub overwrite: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            x_unit: XUnit::Deg,
            y_unit: YUnit::Counts,
            overwrite: false,
        }
    }
}

/// Statistics from one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionStats {
    /// Output file
    pub output: PathBuf,
    /// Ranges in the input
    pub range_count: usize,
    /// Points written
    pub point_count: usize,
}

/// Converts Bruker RAW4 files to ASC tables
#[derive(Debug, Clone, Default)]
pub struct RawConverter {
    config: ConversionConfig,
}

impl RawConverter {
    /// Converter with default settings (degrees, counts, no overwrite)
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter with explicit settings
    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Active settings
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert `input` into `output`
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConversionStats, ConversionError> {
        let raw = RawFile::open(input)?;
        let point_count = save_asc(
            &raw,
            output,
            self.config.x_unit,
            self.config.y_unit,
            self.config.overwrite,
        )?;
        Ok(ConversionStats {
            output: output.to_path_buf(),
            range_count: raw.ranges.len(),
            point_count,
        })
    }

    /// Convert one batch entry, turning every problem into an outcome
    pub fn convert_entry(&self, input: &Path) -> FileOutcome {
        if !input.exists() {
            warn!("{} does not exist", input.display());
            return FileOutcome::skipped(input, "file does not exist");
        }
        let is_raw = input
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("raw"));
        if !is_raw {
            warn!("{} is not a .raw file", input.display());
            return FileOutcome::skipped(input, "not a .raw file");
        }
        let output = asc_path(input);
        if output.exists() && !self.config.overwrite {
            warn!("{} already exists", output.display());
            return FileOutcome::skipped(input, format!("{} already exists", output.display()));
        }

        info!("Extracting data from {}", input.display());
        match self.convert(input, &output) {
            Ok(stats) => FileOutcome::converted(input, stats.output, stats.point_count),
            Err(e) => {
                warn!("{} failed: {}", input.display(), e);
                FileOutcome::failed(input, e)
            }
        }
    }

    /// Convert every input in order; failures are recorded, not propagated
    pub fn convert_batch<P: AsRef<Path>>(&self, inputs: &[P]) -> ConversionReport {
        let mut report = ConversionReport::new();
        for input in inputs {
            report.add(self.convert_entry(input.as_ref()));
        }
        report
    }

    /// Parallel variant of [`convert_batch`](Self::convert_batch); outcome order matches `inputs`
    #[cfg(feature = "parallel")]
    pub fn convert_batch_parallel<P: AsRef<Path> + Sync>(&self, inputs: &[P]) -> ConversionReport {
        use rayon::prelude::*;

        let outcomes: Vec<FileOutcome> = inputs
            .par_iter()
            .map(|input| self.convert_entry(input.as_ref()))
            .collect();
        ConversionReport { outcomes }
    }
}
