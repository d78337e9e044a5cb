//! Output formats for decoded measurements.
//!
//! - [`asc`]: the whitespace-aligned `.asc` table written next to each `.raw`
//! - [`json`]: an order-preserving structure dump for inspection

pub mod asc;
pub mod json;

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use log::info;

use crate::quantities::{QuantityError, XUnit, YUnit};
use crate::raw4::RawFile;

pub use asc::write_asc;
pub use json::{to_json_pretty, to_json_value};

/// Errors that can occur while exporting
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error writing output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The file's ranges could not be turned into measurement arrays
    #[error("Quantity error: {0}")]
    QuantityError(#[from] QuantityError),

    /// Output exists and overwriting was not requested
    #[error("Output already exists: {0}")]
    OutputExists(PathBuf),
}

/// The `.asc` path written for `input`.
pub fn asc_path(input: &Path) -> PathBuf {
    input.with_extension("asc")
}

fn create_output(output: &Path, overwrite: bool) -> Result<File, ExportError> {
    if overwrite {
        return Ok(File::create(output)?);
    }
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ExportError::OutputExists(output.to_path_buf()),
            _ => ExportError::IoError(e),
        })
}

/// Derive data from `raw` and write it to `output` as an ASC table.
///
/// Without `overwrite` the output is created exclusively, so an existing file
/// (or one created concurrently) is never truncated. Returns the number of
/// rows written.
pub fn save_asc(
    raw: &RawFile,
    output: &Path,
    x_unit: XUnit,
    y_unit: YUnit,
    overwrite: bool,
) -> Result<usize, ExportError> {
    let data = raw.data(x_unit, y_unit)?;
    let writer = BufWriter::new(create_output(output, overwrite)?);
    write_asc(writer, &data, x_unit, y_unit)?;
    info!(
        "Wrote {} points ({} range(s)) to {}",
        data.point_count(),
        raw.ranges.len(),
        output.display()
    );
    Ok(data.point_count())
}
