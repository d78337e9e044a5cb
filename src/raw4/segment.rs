//! Segment headers shared by the global metadata block and range sub-headers.
//!
//! Every segment starts with a `u32` type code followed by a `u32` length that
//! counts the 8 header bytes themselves. The two sentinel codes mark the first
//! field of a range record and are never followed by a length at that point.
//! The sentinel values (0 and 160) come from reverse engineering, not from a
//! vendor document.

use super::cursor::ByteCursor;
use super::error::{Raw4Error, Result};

/// Segment type codes that start a range record.
pub const RANGE_SENTINELS: [u32; 2] = [0, 160];

/// Size of the `[type][length]` prefix counted in every segment length.
pub const SEGMENT_HEADER_LEN: u32 = 8;

/// Type code of a range sub-segment carrying an axis position.
pub const AXIS_SUBSEGMENT: u32 = 50;

/// Global segment kinds the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// HRXRD alignment vectors (type 5)
    Alignment,
    /// Named text variable (type 10)
    VarInfo,
    /// X-ray source configuration (type 30)
    HardwareInfo,
    /// Goniometer drive alignment (type 60)
    DriveInfo,
    /// Anything else; skipped to its declared length
    Unknown(u32),
}

impl SegmentKind {
    /// Map a type code to its kind.
    pub fn from_code(code: u32) -> Self {
        match code {
            5 => SegmentKind::Alignment,
            10 => SegmentKind::VarInfo,
            30 => SegmentKind::HardwareInfo,
            60 => SegmentKind::DriveInfo,
            other => SegmentKind::Unknown(other),
        }
    }

    /// Smallest length a segment of this kind may declare.
    pub fn min_length(&self) -> u32 {
        match self {
            SegmentKind::Alignment => 104,
            SegmentKind::VarInfo => 36,
            SegmentKind::HardwareInfo => 120,
            SegmentKind::DriveInfo => 76,
            SegmentKind::Unknown(_) => SEGMENT_HEADER_LEN,
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            SegmentKind::Alignment => "Alignment",
            SegmentKind::VarInfo => "VarInfo",
            SegmentKind::HardwareInfo => "HardwareConfiguration",
            SegmentKind::DriveInfo => "DriveAlignment",
            SegmentKind::Unknown(_) => "Unknown",
        }
    }
}

/// Result of reading the next global segment header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentHeader {
    /// A range record starts here; the sentinel type code has been consumed.
    RangeStart(u32),
    /// A metadata segment with its declared total length.
    Segment {
        /// Decoded type
        kind: SegmentKind,
        /// Declared length including the 8 header bytes
        length: u32,
        /// Offset of the type field
        offset: usize,
    },
}

/// True if `code` is one of the range sentinels.
pub fn is_range_sentinel(code: u32) -> bool {
    RANGE_SENTINELS.contains(&code)
}

/// Read a global segment header.
///
/// A sentinel type returns immediately without reading a length. Otherwise the
/// length is validated against the kind's minimum.
pub fn read_segment_header(cursor: &mut ByteCursor<'_>) -> Result<SegmentHeader> {
    let offset = cursor.position();
    let code = cursor.read_u32_le()?;
    if is_range_sentinel(code) {
        return Ok(SegmentHeader::RangeStart(code));
    }
    let kind = SegmentKind::from_code(code);
    let length = read_length(cursor, offset, kind.name(), kind.min_length())?;
    Ok(SegmentHeader::Segment {
        kind,
        length,
        offset,
    })
}

/// Read a segment length and enforce `minimum`.
pub(crate) fn read_length(
    cursor: &mut ByteCursor<'_>,
    offset: usize,
    segment: &'static str,
    minimum: u32,
) -> Result<u32> {
    let length = cursor.read_u32_le()?;
    // The generic 8-byte floor applies before any type-specific minimum.
    let minimum = minimum.max(SEGMENT_HEADER_LEN);
    if length < minimum {
        return Err(Raw4Error::SegmentTooShort {
            offset,
            segment,
            length,
            minimum,
        });
    }
    Ok(length)
}

/// Skip whatever part of a segment the decoder did not consume.
///
/// `consumed` counts bytes read since the type field, header included.
pub(crate) fn skip_rest(cursor: &mut ByteCursor<'_>, length: u32, consumed: u32) -> Result<()> {
    cursor.skip(length.saturating_sub(consumed) as usize)
}
