//! File header and global (scan-independent) metadata segments.

use log::{debug, trace};
use serde::Serialize;

use super::cursor::ByteCursor;
use super::error::Result;
use super::meta::MetaMap;
use super::segment::{read_segment_header, skip_rest, SegmentHeader, SegmentKind};

/// Length of the fixed file header.
pub const FILE_HEADER_LEN: usize = 61;

/// Version tag written by format-4 files.
pub const RAW4_VERSION_TAG: &str = "RAW4";

/// HRXRD substrate and sample orientation vectors (segment type 5).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentInfo {
    /// Substrate surface normal, e.g. `"0 0 1"`
    pub substrate_normal: String,
    /// Substrate in-plane azimuth
    pub substrate_azimuth: String,
    /// Sample surface normal
    pub sample_normal: String,
    /// Sample in-plane azimuth
    pub sample_azimuth: String,
}

/// X-ray source configuration (segment type 30).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HardwareInfo {
    /// Weighted average Kα wavelength (Å)
    pub alpha_average: f64,
    /// Kα1 wavelength (Å)
    pub alpha1: f64,
    /// Kα2 wavelength (Å)
    pub alpha2: f64,
    /// Kβ wavelength (Å)
    pub beta: f64,
    /// Kα2/Kα1 intensity ratio
    pub alpha_ratio: f64,
    /// Tube anode material, e.g. `"Cu"`
    pub anode_material: String,
}

/// One goniometer drive alignment record (segment type 60).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DriveInfo {
    /// Alignment flag as stored
    pub align_flag: u32,
    /// Drive name
    pub name: String,
    /// Alignment offset
    pub delta: f64,
}

/// Everything decoded before the first range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalMetadata {
    /// 4-byte format version tag
    pub version: String,
    /// Measurement date as written by the instrument
    pub measure_date: String,
    /// Measurement time as written by the instrument
    pub measure_time: String,
    /// Alignment vectors, if the file carries them
    pub alignment: Option<AlignmentInfo>,
    /// Source configuration, if the file carries it
    pub hardware: Option<HardwareInfo>,
    /// Drive records in on-disk order
    pub drives: Vec<DriveInfo>,
    /// Named text variables (var-info segments) in first-seen order
    pub variables: MetaMap,
}

impl GlobalMetadata {
    /// Look up a var-info tag such as `"JON"`.
    pub fn variable(&self, tag: &str) -> Option<&str> {
        self.variables.get_str(tag)
    }

    /// True if the version tag identifies format 4.
    pub fn is_raw4(&self) -> bool {
        self.version == RAW4_VERSION_TAG
    }

    /// Flat key/value rendering in decode order.
    ///
    /// Drive records appear as `DRIVE{n}_ALIGN_FLAG`, `DRIVE{n}_NAME` and
    /// `DRIVE{n}_DELTA`.
    pub fn to_meta_map(&self) -> MetaMap {
        let mut map = MetaMap::new();
        map.insert("version", self.version.as_str());
        map.insert("MEASURE_DATE", self.measure_date.as_str());
        map.insert("MEASURE_TIME", self.measure_time.as_str());
        if let Some(a) = &self.alignment {
            map.insert("SUBSTRATE NORM", a.substrate_normal.as_str());
            map.insert("SUBSTRATE AZIMUTH", a.substrate_azimuth.as_str());
            map.insert("SAMPLE NORMAL", a.sample_normal.as_str());
            map.insert("SAMPLE AZIMUTH", a.sample_azimuth.as_str());
        }
        map.extend(self.variables.clone());
        if let Some(h) = &self.hardware {
            map.insert("ALPHA_AVERAGE", h.alpha_average);
            map.insert("ALPHA1", h.alpha1);
            map.insert("ALPHA2", h.alpha2);
            map.insert("BETA", h.beta);
            map.insert("ALPHA_RATIO", h.alpha_ratio);
            map.insert("ANODE_MATERIAL", h.anode_material.as_str());
        }
        for (n, d) in self.drives.iter().enumerate() {
            map.insert(format!("DRIVE{n}_ALIGN_FLAG"), d.align_flag);
            map.insert(format!("DRIVE{n}_NAME"), d.name.as_str());
            map.insert(format!("DRIVE{n}_DELTA"), d.delta);
        }
        map
    }
}

/// Decode the file header and the global segment loop.
///
/// Returns the metadata together with the sentinel type code that ended the
/// loop; that code is the first field of the first range.
pub fn decode_global(cursor: &mut ByteCursor<'_>) -> Result<(GlobalMetadata, u32)> {
    let mut meta = GlobalMetadata {
        version: cursor.read_fixed_string(4)?,
        ..Default::default()
    };
    cursor.skip(8)?;
    meta.measure_date = cursor.read_fixed_string(12)?;
    meta.measure_time = cursor.read_fixed_string(10)?;
    cursor.skip(27)?;
    debug!(
        "RAW header: version={:?} date={:?} time={:?}",
        meta.version, meta.measure_date, meta.measure_time
    );

    loop {
        let (kind, length, offset) = match read_segment_header(cursor)? {
            SegmentHeader::RangeStart(code) => {
                debug!(
                    "Global metadata ends at offset {} (range sentinel {})",
                    cursor.position() - 4,
                    code
                );
                return Ok((meta, code));
            }
            SegmentHeader::Segment {
                kind,
                length,
                offset,
            } => (kind, length, offset),
        };
        debug!("Segment {} ({:?}) length {} at offset {}", kind.name(), kind, length, offset);

        match kind {
            SegmentKind::Alignment => {
                cursor.skip(8)?;
                let substrate_normal = cursor.read_fixed_string(12)?;
                let substrate_azimuth = cursor.read_fixed_string(12)?;
                cursor.skip(40)?;
                let sample_normal = cursor.read_fixed_string(12)?;
                let sample_azimuth = cursor.read_fixed_string(12)?;
                meta.alignment = Some(AlignmentInfo {
                    substrate_normal,
                    substrate_azimuth,
                    sample_normal,
                    sample_azimuth,
                });
                skip_rest(cursor, length, 104)?;
            }
            SegmentKind::VarInfo => {
                cursor.skip(4)?;
                let tag = cursor.read_fixed_string(24)?;
                let value = cursor.read_fixed_string((length - 36) as usize)?;
                trace!("Variable {tag} = {value:?}");
                meta.variables.insert(tag, value);
            }
            SegmentKind::HardwareInfo => {
                cursor.skip(64)?;
                let alpha_average = cursor.read_f64_le()?;
                let alpha1 = cursor.read_f64_le()?;
                let alpha2 = cursor.read_f64_le()?;
                let beta = cursor.read_f64_le()?;
                let alpha_ratio = cursor.read_f64_le()?;
                cursor.skip(4)?;
                let anode_material = cursor.read_fixed_string(4)?;
                meta.hardware = Some(HardwareInfo {
                    alpha_average,
                    alpha1,
                    alpha2,
                    beta,
                    alpha_ratio,
                    anode_material,
                });
                skip_rest(cursor, length, 120)?;
            }
            SegmentKind::DriveInfo => {
                let align_flag = cursor.read_u32_le()?;
                let name = cursor.read_fixed_string(24)?;
                cursor.skip(32)?;
                let delta = cursor.read_f64_le()?;
                meta.drives.push(DriveInfo {
                    align_flag,
                    name,
                    delta,
                });
                skip_rest(cursor, length, 76)?;
            }
            SegmentKind::Unknown(code) => {
                trace!("Skipping unknown segment type {code}");
                skip_rest(cursor, length, 8)?;
            }
        }
    }
}
