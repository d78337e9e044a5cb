//! `.spc` signal files and their CSV conversion.

use std::fs;
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};
use log::{info, warn};
use serde::Serialize;

use super::{FmrError, ScanParams};

/// One field sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sweep {
    /// Goniometer angle in degrees, for sweeps of a 2D angle scan
    pub angle: Option<f64>,
    /// Magnetic field in mT
    pub field_mt: Vec<f64>,
    /// Resonance signal
    pub signal: Vec<f64>,
}

/// Parameters plus decoded sweeps of one `.spc`/`.par` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FmrMeasurement {
    /// Parsed `.par` file
    pub params: ScanParams,
    /// Sweeps in acquisition order
    pub sweeps: Vec<Sweep>,
}

impl FmrMeasurement {
    /// Load `<name>.spc` and its sibling `<name>.par`.
    pub fn load(spc_path: &Path) -> Result<Self, FmrError> {
        let par_text = fs::read_to_string(par_path_for(spc_path))?;
        let params = ScanParams::parse(&par_text)?;
        let signal = read_signal(spc_path)?;
        let sweeps = split_sweeps(&params, &signal)?;
        Ok(Self { params, sweeps })
    }
}

/// The `.par` file accompanying a `.spc` (or extensionless) path.
pub fn par_path_for(path: &Path) -> PathBuf {
    path.with_extension("par")
}

/// Read a raw little-endian `f32` signal.
pub fn read_signal(path: &Path) -> Result<Vec<f32>, FmrError> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(FmrError::RaggedSignal {
            path: path.to_path_buf(),
            len: bytes.len(),
        });
    }
    let mut values = vec![0f32; bytes.len() / 4];
    LittleEndian::read_f32_into(&bytes, &mut values);
    Ok(values)
}

/// Split a flat signal into sweeps according to `params`.
///
/// 2D scans are only interpreted when the second axis is an angle sweep; the
/// angle of sweep `k` is `(GAN + k * GANS) mod 360`.
pub fn split_sweeps(params: &ScanParams, signal: &[f32]) -> Result<Vec<Sweep>, FmrError> {
    let x_res = params.x_res();
    let y_num = params.y_num();
    if y_num == 0 {
        return Err(FmrError::InvalidValue {
            key: "SSY".to_string(),
            value: "0".to_string(),
        });
    }

    let expected = x_res.saturating_mul(y_num);
    if signal.len() != expected {
        return Err(FmrError::ShapeMismatch {
            expected,
            actual: signal.len(),
        });
    }
    let field = params.field_axis_mt();

    if !params.is_2d() {
        return Ok(vec![Sweep {
            angle: None,
            field_mt: field,
            signal: signal.iter().map(|&v| f64::from(v)).collect(),
        }]);
    }

    if params.y_scan_type.as_deref() != Some("angle-sweep") {
        return Err(FmrError::Unsupported2D(params.y_scan_type.clone()));
    }
    let gonio = params
        .gonio
        .ok_or_else(|| FmrError::MissingKey("GAN".to_string()))?;

    Ok(signal
        .chunks(x_res.max(1))
        .enumerate()
        .map(|(k, chunk)| Sweep {
            angle: Some((gonio + k as f64 * params.gonio_step).rem_euclid(360.0)),
            field_mt: field.clone(),
            signal: chunk.iter().map(|&v| f64::from(v)).collect(),
        })
        .collect())
}

/// Write one sweep as `field_mT,signal` rows.
pub fn write_sweep_csv(path: &Path, sweep: &Sweep) -> Result<(), FmrError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["field_mT", "signal"])?;
    for (b, s) in sweep.field_mt.iter().zip(&sweep.signal) {
        writer.write_record([format!("{b:.4}"), format!("{s:.3}")])?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_path(spc_path: &Path, sweep: &Sweep) -> PathBuf {
    match sweep.angle {
        Some(angle) => spc_path.with_file_name(format!("{angle:.0}deg_from_2D.csv")),
        None => spc_path.with_extension("csv"),
    }
}

/// Files written by [`convert_spc`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FmrStats {
    /// CSV paths written, in sweep order
    pub written: Vec<PathBuf>,
    /// Rows written across all CSV files
    pub point_count: usize,
}

/// Convert a `.spc`/`.par` pair to CSV files next to the input.
///
/// Existing outputs are left alone unless `overwrite` is set.
pub fn convert_spc(spc_path: &Path, overwrite: bool) -> Result<FmrStats, FmrError> {
    let measurement = FmrMeasurement::load(spc_path)?;
    let mut stats = FmrStats::default();
    for sweep in &measurement.sweeps {
        let out = csv_path(spc_path, sweep);
        if out.exists() && !overwrite {
            warn!("{} already exists, skipping", out.display());
            continue;
        }
        write_sweep_csv(&out, sweep)?;
        info!("Wrote {}", out.display());
        stats.written.push(out);
        stats.point_count += sweep.signal.len();
    }
    Ok(stats)
}
