//! # Bruker RAW version 4 decoder
//!
//! Reads the segmented binary files written by Bruker D8 diffractometers
//! (XRR, XRD and RSM measurements). The layout below was reverse engineered;
//! there is no vendor specification to validate against.
//!
//! ## File layout
//!
//! ```text
//! file header (61 bytes)
//! ├── version tag      4 bytes  ("RAW4")
//! ├── reserved         8
//! ├── measure date    12
//! ├── measure time    10
//! └── reserved        27
//! global segment*      [type u32][length u32][payload]
//!                      5 alignment, 10 var-info, 30 hardware, 60 drive
//! range+               begins with a sentinel type (0 or 160), no length
//! ├── primary header 160 bytes (sentinel included)
//! ├── sub-segments     sub_header_size bytes, type 50 = axis position
//! └── samples          steps * datum_size bytes (f32 counts)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use rawxrd::raw4::RawFile;
//!
//! let raw = RawFile::open("scan.raw")?;
//! for range in &raw.ranges {
//!     println!("{}: {} samples", range.header.scan_type.name(), range.len());
//! }
//! # Ok::<(), rawxrd::raw4::Raw4Error>(())
//! ```

mod cursor;
mod error;
mod global;
mod meta;
mod range;
mod segment;

#[cfg(test)]
mod tests;

use std::path::Path;

use log::{debug, info};

pub use cursor::ByteCursor;
pub use error::{Raw4Error, Result};
pub use global::{
    decode_global, AlignmentInfo, DriveInfo, GlobalMetadata, HardwareInfo, FILE_HEADER_LEN,
    RAW4_VERSION_TAG,
};
pub use meta::{MetaMap, MetaValue};
pub use range::{decode_range, x_positions, Axis, DataRange, RangeHeader, ScanKind, RANGE_HEADER_LEN};
pub use segment::{
    is_range_sentinel, read_segment_header, SegmentHeader, SegmentKind, AXIS_SUBSEGMENT,
    RANGE_SENTINELS,
};

/// A fully decoded RAW4 file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFile {
    /// Global metadata
    pub meta: GlobalMetadata,
    /// Ranges in on-disk order
    pub ranges: Vec<DataRange>,
    /// Cursor position where decoding stopped
    pub offset: usize,
    /// Total buffer length
    pub length: usize,
}

impl RawFile {
    /// Read a file into memory and decode it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        info!("Decoding {} ({} bytes)", path.display(), bytes.len());
        Self::decode(&bytes)
    }

    /// Decode an in-memory RAW4 buffer.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(bytes);
        let (meta, mut sentinel) = decode_global(&mut cursor)?;

        let mut ranges = Vec::new();
        loop {
            let range = decode_range(&mut cursor, ranges.len())?;
            ranges.push(range);

            match next_range_type(&mut cursor)? {
                Some(code) if is_range_sentinel(code) => sentinel = code,
                Some(code) => {
                    debug!(
                        "Type {} after range {} is not a range sentinel; stopping at offset {}",
                        code,
                        ranges.len() - 1,
                        cursor.position()
                    );
                    break;
                }
                None => break,
            }
        }
        debug!(
            "Decoded {} range(s), last sentinel {}, stopped at {}/{}",
            ranges.len(),
            sentinel,
            cursor.position(),
            cursor.len()
        );

        Ok(Self {
            meta,
            ranges,
            offset: cursor.position(),
            length: cursor.len(),
        })
    }

    /// Ranges whose samples were decoded.
    pub fn measured_ranges(&self) -> impl Iterator<Item = &DataRange> {
        self.ranges.iter().filter(|r| !r.is_unknown())
    }

    /// True if the file holds more than one range (an RSM or rocking-curve map).
    pub fn is_multi_range(&self) -> bool {
        self.ranges.len() > 1
    }
}

/// Lookahead for the next range: end of buffer is end of input, not an error.
fn next_range_type(cursor: &mut ByteCursor<'_>) -> Result<Option<u32>> {
    if cursor.at_end() {
        return Ok(None);
    }
    match cursor.read_u32_le() {
        Ok(code) => Ok(Some(code)),
        Err(e) if e.is_truncation() => Ok(None),
        Err(e) => Err(e),
    }
}
