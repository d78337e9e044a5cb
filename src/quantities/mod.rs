//! Physical quantities derived from decoded ranges.
//!
//! A single-range file is a line scan (XRR/XRD): 2θ or the momentum transfer
//! `q = 20·sin(θ)/λ` (nm⁻¹, λ in Å) against intensity. A multi-range file is a
//! reciprocal space map: every range is a 2θ sweep at a fixed ω (its THETA
//! axis), giving
//!
//! ```text
//! qx = 10·(cos(2θ − ω) − cos ω) / λ
//! qz = 10·(sin(2θ − ω) + sin ω) / λ
//! ```

mod error;


use log::warn;
use serde::{Deserialize, Serialize};

use crate::raw4::{Axis, DataRange, RawFile};

pub use error::QuantityError;

/// Result alias for quantity derivation.
pub type Result<T> = std::result::Result<T, QuantityError>;

const RAD: f64 = std::f64::consts::PI / 180.0;

/// Units for the angular axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XUnit {
    /// Raw goniometer angles in degrees
    Deg,
    /// Reciprocal-space coordinates in nm⁻¹
    #[default]
    Reciprocal,
}

/// Units for the intensity axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YUnit {
    /// Counts per second, as decoded
    #[default]
    Cps,
    /// Integrated counts (CPS × time per step)
    Counts,
}

/// Derived measurement arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MeasurementData {
    /// Single range: `x` against intensity `y`
    Line {
        /// 2θ (degrees) or q (nm⁻¹)
        x: Vec<f64>,
        /// Intensity
        y: Vec<f64>,
    },
    /// Several ranges: one row per range with decoded samples
    Map {
        /// 2θ (degrees) or qx (nm⁻¹)
        x: Vec<Vec<f64>>,
        /// ω (degrees) or qz (nm⁻¹)
        y: Vec<Vec<f64>>,
        /// Intensity
        z: Vec<Vec<f64>>,
    },
}

impl MeasurementData {
    /// Total number of points.
    pub fn point_count(&self) -> usize {
        match self {
            MeasurementData::Line { y, .. } => y.len(),
            MeasurementData::Map { z, .. } => z.iter().map(Vec::len).sum(),
        }
    }
}

/// Momentum transfer `20·sin(2θ/2)/λ` for each angle.
pub fn q_from_two_theta(two_theta: &[f64], lambda: f64) -> Vec<f64> {
    two_theta
        .iter()
        .map(|tt| 20.0 * (tt / 2.0 * RAD).sin() / lambda)
        .collect()
}

/// In-plane and out-of-plane coordinates `(qx, qz)` for one 2θ/ω pair.
pub fn q_in_out_of_plane(two_theta: f64, omega: f64, lambda: f64) -> (f64, f64) {
    let exit = (two_theta - omega) * RAD;
    let incident = omega * RAD;
    let qx = 10.0 * (exit.cos() - incident.cos()) / lambda;
    let qz = 10.0 * (exit.sin() + incident.sin()) / lambda;
    (qx, qz)
}

/// Wavelength for reciprocal-space conversion.
///
/// The source's average Kα wavelength when the file carries a hardware
/// segment, otherwise the first range's used wavelength.
pub fn wavelength(raw: &RawFile) -> Result<f64> {
    let lambda = match (&raw.meta.hardware, raw.ranges.first()) {
        (Some(hw), _) => hw.alpha_average,
        (None, Some(range)) => range.header.used_lambda,
        (None, None) => return Err(QuantityError::NoRanges),
    };
    if lambda.is_finite() && lambda > 0.0 {
        Ok(lambda)
    } else {
        Err(QuantityError::InvalidWavelength(lambda))
    }
}

fn scale_intensity(range: &DataRange, y: &[f64], y_unit: YUnit) -> Vec<f64> {
    match y_unit {
        YUnit::Cps => y.to_vec(),
        YUnit::Counts => {
            let dwell = f64::from(range.header.time_per_step);
            y.iter().map(|v| v * dwell).collect()
        }
    }
}

impl RawFile {
    /// Derive measurement arrays in the requested units.
    ///
    /// Ranges with an unrecognized scan type carry no samples and are left
    /// out: a lone unknown range gives an empty line, and unknown rows are
    /// absent from a map.
    pub fn data(&self, x_unit: XUnit, y_unit: YUnit) -> Result<MeasurementData> {
        match self.ranges.as_slice() {
            [] => Err(QuantityError::NoRanges),
            [range] => self.line_data(range, x_unit, y_unit),
            _ => self.map_data(x_unit, y_unit),
        }
    }

    fn line_data(&self, range: &DataRange, x_unit: XUnit, y_unit: YUnit) -> Result<MeasurementData> {
        let (Some(tt), Some(cps)) = (&range.x_values, &range.intensities) else {
            warn!("Range has scan type {:?}, no samples to derive", range.header.scan_type.name());
            return Ok(MeasurementData::Line {
                x: Vec::new(),
                y: Vec::new(),
            });
        };
        let x = match x_unit {
            XUnit::Deg => tt.to_vec(),
            XUnit::Reciprocal => q_from_two_theta(tt, wavelength(self)?),
        };
        Ok(MeasurementData::Line {
            x,
            y: scale_intensity(range, cps, y_unit),
        })
    }

    fn map_data(&self, x_unit: XUnit, y_unit: YUnit) -> Result<MeasurementData> {
        let mut two_theta = Vec::with_capacity(self.ranges.len());
        let mut omega = Vec::with_capacity(self.ranges.len());
        let mut intensity = Vec::with_capacity(self.ranges.len());
        let mut width = None;

        for (i, range) in self.ranges.iter().enumerate() {
            let (Some(tt), Some(cps)) = (&range.x_values, &range.intensities) else {
                warn!(
                    "Range {} has scan type {:?}, left out of the map",
                    i,
                    range.header.scan_type.name()
                );
                continue;
            };
            let expected = *width.get_or_insert(tt.len());
            if tt.len() != expected || cps.len() != expected {
                return Err(QuantityError::ShapeMismatch {
                    range: i,
                    expected,
                    actual: tt.len().max(cps.len()),
                });
            }
            let theta = range
                .axis(Axis::Theta)
                .ok_or(QuantityError::MissingTheta { range: i })?;
            two_theta.push(tt.to_vec());
            omega.push(vec![theta; expected]);
            intensity.push(scale_intensity(range, cps, y_unit));
        }

        if x_unit == XUnit::Deg || two_theta.is_empty() {
            return Ok(MeasurementData::Map {
                x: two_theta,
                y: omega,
                z: intensity,
            });
        }

        let lambda = wavelength(self)?;
        let (qx, qz): (Vec<Vec<f64>>, Vec<Vec<f64>>) = two_theta
            .iter()
            .zip(&omega)
            .map(|(tt_row, w_row)| {
                tt_row
                    .iter()
                    .zip(w_row)
                    .map(|(&tt, &w)| q_in_out_of_plane(tt, w, lambda))
                    .unzip::<f64, f64, Vec<f64>, Vec<f64>>()
            })
            .unzip();

        Ok(MeasurementData::Map {
            x: qx,
            y: qz,
            z: intensity,
        })
    }
}
