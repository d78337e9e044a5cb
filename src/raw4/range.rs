//! Range records: fixed primary header, axis sub-segments, and sample data.

use log::{debug, trace, warn};
use serde::Serialize;

use super::cursor::ByteCursor;
use super::error::{Raw4Error, Result};
use super::meta::MetaMap;
use super::segment::{read_length, AXIS_SUBSEGMENT};

/// Size of the fixed primary range header, sentinel type included.
pub const RANGE_HEADER_LEN: usize = 160;

/// Scan types whose sample payload the decoder interprets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScanKind {
    /// "Locked Coupled" (θ/2θ)
    LockedCoupled,
    /// "Unlocked Coupled"
    UnlockedCoupled,
    /// "PSD Fix Scan"
    PsdFixScan,
    /// Any other scan type string; payload is skipped
    Unknown(String),
}

impl ScanKind {
    /// Classify a scan-type string.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Locked Coupled" => ScanKind::LockedCoupled,
            "Unlocked Coupled" => ScanKind::UnlockedCoupled,
            "PSD Fix Scan" => ScanKind::PsdFixScan,
            other => ScanKind::Unknown(other.to_string()),
        }
    }

    /// The scan-type string as stored in the file.
    pub fn name(&self) -> &str {
        match self {
            ScanKind::LockedCoupled => "Locked Coupled",
            ScanKind::UnlockedCoupled => "Unlocked Coupled",
            ScanKind::PsdFixScan => "PSD Fix Scan",
            ScanKind::Unknown(name) => name,
        }
    }

    /// True for scan types whose samples are decoded.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ScanKind::Unknown(_))
    }
}

/// Goniometer axes whose positions are recorded per range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    /// Incident angle ω
    Theta,
    /// Detector angle 2θ
    TwoTheta,
    /// Divergence slit
    DivergenceSlit,
    /// Antiscattering slit
    AntiscatteringSlit,
    /// φ rotation
    Phi,
    /// χ tilt
    Chi,
    /// Sample stage X
    XDrive,
    /// Sample stage Y
    YDrive,
    /// Sample stage Z
    ZDrive,
}

impl Axis {
    /// All recognized axes.
    pub const ALL: [Axis; 9] = [
        Axis::Theta,
        Axis::TwoTheta,
        Axis::DivergenceSlit,
        Axis::AntiscatteringSlit,
        Axis::Phi,
        Axis::Chi,
        Axis::XDrive,
        Axis::YDrive,
        Axis::ZDrive,
    ];

    /// Match an axis label as written in a type-50 sub-segment.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == label)
    }

    /// Label as written in the file.
    pub fn label(&self) -> &'static str {
        match self {
            Axis::Theta => "Theta",
            Axis::TwoTheta => "2Theta",
            Axis::DivergenceSlit => "Divergence Slit",
            Axis::AntiscatteringSlit => "Antiscattering Slit",
            Axis::Phi => "Phi",
            Axis::Chi => "Chi",
            Axis::XDrive => "X-Drive",
            Axis::YDrive => "Y-Drive",
            Axis::ZDrive => "Z-Drive",
        }
    }

    /// Metadata key: the label uppercased with `-` replaced by `_`.
    pub fn meta_key(&self) -> String {
        self.label().to_uppercase().replace('-', "_")
    }
}

/// Fixed fields of a range's primary header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeHeader {
    /// Scan type
    pub scan_type: ScanKind,
    /// First 2θ position (degrees)
    pub start_angle: f64,
    /// Angular increment (degrees)
    pub step_size: f64,
    /// Declared number of samples
    pub steps: u32,
    /// Dwell time per sample (seconds)
    pub time_per_step: f32,
    /// Generator voltage (kV)
    pub generator_voltage: f32,
    /// Generator current (mA)
    pub generator_current: f32,
    /// Wavelength used for this range (Å)
    pub used_lambda: f64,
    /// Bytes per sample
    pub datum_size: u32,
    /// Bytes of sub-segments following the primary header
    pub sub_header_size: u32,
}

/// One measurement sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRange {
    /// Primary header fields
    pub header: RangeHeader,
    /// Axis positions from type-50 sub-segments, in on-disk order
    pub axes: Vec<(Axis, f64)>,
    /// 2θ positions; `None` for unrecognized scan types
    pub x_values: Option<Vec<f64>>,
    /// Counts per second; `None` for unrecognized scan types
    pub intensities: Option<Vec<f64>>,
}

impl DataRange {
    /// Position recorded for `axis`, if any.
    pub fn axis(&self, axis: Axis) -> Option<f64> {
        self.axes
            .iter()
            .rev()
            .find(|(a, _)| *a == axis)
            .map(|(_, v)| *v)
    }

    /// True if the scan type was not recognized and no samples were decoded.
    pub fn is_unknown(&self) -> bool {
        !self.header.scan_type.is_recognized()
    }

    /// Number of decoded samples (zero when the payload was skipped).
    pub fn len(&self) -> usize {
        self.intensities.as_ref().map_or(0, Vec::len)
    }

    /// True if the range carries no decoded samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat key/value rendering of the range metadata.
    pub fn to_meta_map(&self) -> MetaMap {
        let h = &self.header;
        let mut map = MetaMap::new();
        map.insert("SCAN_TYPE", h.scan_type.name());
        map.insert("START_ANGLE", h.start_angle);
        map.insert("STEP_SIZE", h.step_size);
        map.insert("STEPS", h.steps);
        map.insert("TIME_PER_STEP", h.time_per_step);
        map.insert("GENERATOR_VOLTAGE", h.generator_voltage);
        map.insert("GENERATOR_CURRENT", h.generator_current);
        map.insert("USED_LAMBDA", h.used_lambda);
        for (axis, value) in &self.axes {
            map.insert(axis.meta_key(), *value);
        }
        if self.is_unknown() {
            map.insert("UNKNOWN_RANGE_SCAN_TYPE", "true");
        }
        map
    }
}

/// Angle positions `start + i * step` for `i in 0..steps`, rounded to 4 decimals.
///
/// Rounding works on the exact binary value, so `10.00005` (stored just below
/// the tie) rounds down to `10.0`.
pub fn x_positions(start: f64, step: f64, steps: u32) -> Vec<f64> {
    (0..steps)
        .map(|i| round4(start + f64::from(i) * step))
        .collect()
}

fn round4(x: f64) -> f64 {
    format!("{x:.4}").parse().unwrap_or(x)
}

/// Decode one range. The sentinel type code has already been consumed.
pub fn decode_range(cursor: &mut ByteCursor<'_>, index: usize) -> Result<DataRange> {
    let header = read_range_header(cursor)?;
    debug!(
        "Range {}: {:?} start={} step={} steps={} datum={} sub_header={}",
        index,
        header.scan_type.name(),
        header.start_angle,
        header.step_size,
        header.steps,
        header.datum_size,
        header.sub_header_size
    );

    if !header.scan_type.is_recognized() {
        warn!(
            "Range {}: unknown scan type {:?}, skipping {} sample bytes",
            index,
            header.scan_type.name(),
            u64::from(header.datum_size) * u64::from(header.steps)
        );
        cursor.skip(header.sub_header_size as usize)?;
        cursor.skip(header.datum_size as usize * header.steps as usize)?;
        return Ok(DataRange {
            header,
            axes: Vec::new(),
            x_values: None,
            intensities: None,
        });
    }

    let axes = read_axis_segments(cursor, index, header.sub_header_size)?;

    if header.datum_size != 4 {
        return Err(Raw4Error::UnexpectedDatumSize {
            range: index,
            datum_size: header.datum_size,
        });
    }

    // Samples are read before any step-sized allocation so a corrupt step count fails as truncation.
    let dwell = f64::from(header.time_per_step);
    let mut intensities = Vec::with_capacity((header.steps as usize).min(cursor.remaining() / 4));
    for _ in 0..header.steps {
        intensities.push(f64::from(cursor.read_f32_le()?) / dwell);
    }
    let x_values = x_positions(header.start_angle, header.step_size, header.steps);
    if x_values.len() != intensities.len() {
        return Err(Raw4Error::LengthMismatch {
            range: index,
            x_len: x_values.len(),
            y_len: intensities.len(),
        });
    }

    Ok(DataRange {
        header,
        axes,
        x_values: Some(x_values),
        intensities: Some(intensities),
    })
}

fn read_range_header(cursor: &mut ByteCursor<'_>) -> Result<RangeHeader> {
    cursor.skip(28)?;
    let scan_type = ScanKind::from_name(&cursor.read_fixed_string(24)?);
    cursor.skip(16)?;
    let start_angle = cursor.read_f64_le()?;
    let step_size = cursor.read_f64_le()?;
    let steps = cursor.read_u32_le()?;
    let time_per_step = cursor.read_f32_le()?;
    cursor.skip(4)?;
    let generator_voltage = cursor.read_f32_le()?;
    let generator_current = cursor.read_f32_le()?;
    cursor.skip(4)?;
    let used_lambda = cursor.read_f64_le()?;
    cursor.skip(16)?;
    let datum_size = cursor.read_u32_le()?;
    let sub_header_size = cursor.read_u32_le()?;
    cursor.skip(16)?;

    Ok(RangeHeader {
        scan_type,
        start_angle,
        step_size,
        steps,
        time_per_step,
        generator_voltage,
        generator_current,
        used_lambda,
        datum_size,
        sub_header_size,
    })
}

/// Consume exactly `size` bytes of sub-segments, collecting axis positions.
fn read_axis_segments(
    cursor: &mut ByteCursor<'_>,
    index: usize,
    size: u32,
) -> Result<Vec<(Axis, f64)>> {
    let mut axes = Vec::new();
    let mut remaining = size;

    while remaining > 0 {
        let offset = cursor.position();
        let seg_type = cursor.read_u32_le()?;
        let minimum = if seg_type == AXIS_SUBSEGMENT { 64 } else { 8 };
        let name = if seg_type == AXIS_SUBSEGMENT {
            "Axis"
        } else {
            "Sub-header"
        };
        let seg_len = read_length(cursor, offset, name, minimum)?;
        if seg_len > remaining {
            return Err(Raw4Error::SubHeaderOverrun {
                range: index,
                offset,
                declared: seg_len,
                remaining,
            });
        }

        if seg_type == AXIS_SUBSEGMENT {
            cursor.skip(4)?;
            let label = cursor.read_fixed_string(24)?;
            match Axis::from_label(&label) {
                Some(axis) => {
                    cursor.skip(20)?;
                    let value = cursor.read_f64_le()?;
                    trace!("Range {index}: {} = {value}", axis.meta_key());
                    axes.push((axis, value));
                    cursor.skip((seg_len - 64) as usize)?;
                }
                None => {
                    trace!("Range {index}: ignoring axis {label:?}");
                    cursor.skip((seg_len - 36) as usize)?;
                }
            }
        } else {
            trace!("Range {index}: skipping sub-segment type {seg_type} ({seg_len} bytes)");
            cursor.skip((seg_len - 8) as usize)?;
        }

        remaining -= seg_len;
    }

    Ok(axes)
}
