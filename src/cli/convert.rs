use anyhow::Result;
use log::info;
#[cfg(not(feature = "parallel"))]
use log::warn;
use std::path::PathBuf;

use rawxrd::converter::{ConversionConfig, RawConverter};
use rawxrd::quantities::{XUnit, YUnit};

use super::config::Config;

/// Convert .raw files to .asc tables
pub fn run(
    files: Vec<PathBuf>,
    x_unit: Option<XUnit>,
    y_unit: Option<YUnit>,
    config_path: Option<PathBuf>,
    overwrite: bool,
    parallel: bool,
) -> Result<()> {
    let file_config = Config::load(config_path.as_deref())?.export;
    let defaults = ConversionConfig::default();

    let config = ConversionConfig {
        x_unit: x_unit.or(file_config.x_unit).unwrap_or(defaults.x_unit),
        y_unit: y_unit.or(file_config.y_unit).unwrap_or(defaults.y_unit),
        overwrite: overwrite || file_config.overwrite.unwrap_or(defaults.overwrite),
    };
    let parallel = parallel || file_config.parallel.unwrap_or(false);

    info!("rawxrd - RAW to ASC");
    info!("===================");
    info!("Files: {}", files.len());
    info!("X units: {:?}", config.x_unit);
    info!("Y units: {:?}", config.y_unit);
    if config.overwrite {
        info!("Overwriting existing outputs");
    }

    let converter = RawConverter::with_config(config);

    let report = {
        #[cfg(feature = "parallel")]
        {
            if parallel {
                info!("Parallel conversion: enabled");
                converter.convert_batch_parallel(&files)
            } else {
                converter.convert_batch(&files)
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            if parallel {
                warn!("Parallel conversion requested but binary was built without the parallel feature; converting sequentially.");
            }
            converter.convert_batch(&files)
        }
    };

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
