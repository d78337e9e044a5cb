//! Bruker EMX `.par` parameter files.
//!
//! Each line holds a short key followed by its value, e.g. `HCF 3480.000000`.
//! When a key repeats, the last occurrence wins.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;

use super::FmrError;

/// Second-axis parameters of a 2D scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondAxis {
    /// Points along x per sweep (`SSX`)
    pub x_len: usize,
    /// Number of sweeps (`SSY`)
    pub y_num: usize,
    /// x start (`XXLB`)
    pub x0: f64,
    /// x width (`XXWI`)
    pub x_range: f64,
    /// y start (`XYLB`)
    pub y0: f64,
    /// y width (`XYWI`)
    pub y_range: f64,
    /// x unit (`XXUN`)
    pub x_unit: String,
    /// y unit (`XYUN`)
    pub y_unit: String,
}

/// Scan parameters of one FMR measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanParams {
    /// Total number of points (`ANZ`), `x_res * y_num`
    pub file_length: usize,
    /// Signal minimum (`MIN`)
    pub y_min: f64,
    /// Signal maximum (`MAX`)
    pub y_max: f64,
    /// 2D scan geometry, `None` for 1D scans
    pub second_axis: Option<SecondAxis>,
    /// Operator / system name (`JON`)
    pub system: String,
    /// Acquisition date (`JDA`)
    pub date: String,
    /// Acquisition time (`JTM`)
    pub time: String,
    /// Calibration file (`JRE`)
    pub calibration_file: String,
    /// x scan type (`JEX`)
    pub x_scan_type: String,
    /// y scan type (`JEY`), e.g. `"angle-sweep"`
    pub y_scan_type: Option<String>,
    /// Field centre in gauss (`HCF`)
    pub field_centre: f64,
    /// Field sweep width in gauss (`HSW`)
    pub field_sweep_width: f64,
    /// Conversion time in ms (`RCT`)
    pub conv_time: f64,
    /// Time constant in ms (`RTC`)
    pub time_constant: f64,
    /// Receiver gain (`RRG`)
    pub receiver_gain: f64,
    /// Modulation amplitude in gauss (`RMA`)
    pub mod_amp: f64,
    /// Microwave frequency in GHz (`MF`)
    pub freq: f64,
    /// Microwave power in µW (`MP`)
    pub power_uw: f64,
    /// Attenuation in dB (`MPD`)
    pub attenuation: f64,
    /// Goniometer angle in degrees (`GAN`)
    pub gonio: Option<f64>,
    /// Goniometer step in degrees (`GANS`)
    pub gonio_step: f64,
}

struct ParText<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> ParText<'a> {
    fn new(text: &'a str) -> Self {
        let mut values = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            let (key, value) = match line.split_once(char::is_whitespace) {
                Some((k, v)) => (k, v.trim()),
                None => (line, ""),
            };
            if !key.is_empty() {
                values.insert(key, value);
            }
        }
        Self { values }
    }

    fn text(&self, key: &str) -> Result<String, FmrError> {
        self.values
            .get(key)
            .map(|v| v.to_string())
            .ok_or_else(|| FmrError::MissingKey(key.to_string()))
    }

    fn parse<T: FromStr>(&self, key: &str) -> Result<T, FmrError> {
        let raw = self
            .values
            .get(key)
            .ok_or_else(|| FmrError::MissingKey(key.to_string()))?;
        raw.parse().map_err(|_| FmrError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }

    fn second_axis(&self) -> Option<SecondAxis> {
        Some(SecondAxis {
            x_len: self.parse("SSX").ok()?,
            y_num: self.parse("SSY").ok()?,
            x0: self.parse("XXLB").ok()?,
            x_range: self.parse("XXWI").ok()?,
            y0: self.parse("XYLB").ok()?,
            y_range: self.parse("XYWI").ok()?,
            x_unit: self.text("XXUN").ok()?,
            y_unit: self.text("XYUN").ok()?,
        })
    }
}

impl ScanParams {
    /// Parse the contents of a `.par` file.
    pub fn parse(text: &str) -> Result<Self, FmrError> {
        let par = ParText::new(text);
        Ok(Self {
            file_length: par.parse("ANZ")?,
            y_min: par.parse("MIN")?,
            y_max: par.parse("MAX")?,
            second_axis: par.second_axis(),
            system: par.text("JON")?,
            date: par.text("JDA")?,
            time: par.text("JTM")?,
            calibration_file: par.text("JRE")?,
            x_scan_type: par.text("JEX")?,
            y_scan_type: par.text("JEY").ok(),
            field_centre: par.parse("HCF")?,
            field_sweep_width: par.parse("HSW")?,
            conv_time: par.parse("RCT")?,
            time_constant: par.parse("RTC")?,
            receiver_gain: par.parse("RRG")?,
            mod_amp: par.parse("RMA")?,
            freq: par.parse("MF")?,
            power_uw: par.parse("MP")?,
            attenuation: par.parse("MPD")?,
            gonio: par.parse("GAN").ok(),
            gonio_step: par.parse("GANS")?,
        })
    }

    /// Number of sweeps (1 for a 1D scan).
    pub fn y_num(&self) -> usize {
        self.second_axis.as_ref().map_or(1, |a| a.y_num)
    }

    /// Points per sweep.
    pub fn x_res(&self) -> usize {
        self.second_axis
            .as_ref()
            .map_or(self.file_length, |a| a.x_len)
    }

    /// True if the file holds more than one sweep.
    pub fn is_2d(&self) -> bool {
        self.y_num() > 1
    }

    /// Field axis in mT: `x_res` points evenly spanning the sweep.
    pub fn field_axis_mt(&self) -> Vec<f64> {
        let n = self.x_res();
        let start = self.field_centre - self.field_sweep_width / 2.0;
        let stop = self.field_centre + self.field_sweep_width / 2.0;
        match n {
            0 => Vec::new(),
            1 => vec![start * 0.1],
            _ => {
                let step = (stop - start) / (n - 1) as f64;
                (0..n).map(|i| (start + i as f64 * step) * 0.1).collect()
            }
        }
    }
}
