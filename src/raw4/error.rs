/// Errors that can occur while decoding a RAW4 file
#[derive(Debug, thiserror::Error)]
pub enum Raw4Error {
    /// I/O error reading the file into memory
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A primitive read ran past the end of the buffer
    #[error("Unexpected end of data at offset {offset}: needed {requested} bytes, {available} available")]
    Truncated {
        /// Cursor position when the read was attempted
        offset: usize,
        /// Number of bytes the read required
        requested: usize,
        /// Number of bytes left in the buffer
        available: usize,
    },

    /// A segment declared a length below the minimum for its type
    #[error("{segment} segment at offset {offset} too short: declared {length} bytes, minimum {minimum}")]
    SegmentTooShort {
        /// Offset of the segment's type field
        offset: usize,
        /// Human-readable segment name
        segment: &'static str,
        /// Declared segment length
        length: u32,
        /// Minimum length for this segment type
        minimum: u32,
    },

    /// A sub-segment runs past the end of its range's sub-header block
    #[error("Range {range}: sub-segment at offset {offset} declares {declared} bytes but only {remaining} remain in the sub-header")]
    SubHeaderOverrun {
        /// Zero-based range index
        range: usize,
        /// Offset of the sub-segment's type field
        offset: usize,
        /// Declared sub-segment length
        declared: u32,
        /// Sub-header bytes left before this sub-segment
        remaining: u32,
    },

    /// The sample datum size is not the 4-byte float the decoder understands
    #[error("Range {range}: unexpected datum size {datum_size} (expected 4)")]
    UnexpectedDatumSize {
        /// Zero-based range index
        range: usize,
        /// Declared datum size in bytes
        datum_size: u32,
    },

    /// Derived x-values and decoded intensities disagree in length
    #[error("Range {range}: x ({x_len}) and y ({y_len}) vector lengths do not match")]
    LengthMismatch {
        /// Zero-based range index
        range: usize,
        /// Number of derived angle positions
        x_len: usize,
        /// Number of decoded intensities
        y_len: usize,
    },
}

impl Raw4Error {
    /// True if this error means the buffer ran out of bytes.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Raw4Error::Truncated { .. })
    }
}

/// Result alias for RAW4 decoding.
pub type Result<T> = std::result::Result<T, Raw4Error>;
