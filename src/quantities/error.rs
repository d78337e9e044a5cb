use thiserror::Error;

/// Errors deriving physical quantities from decoded ranges.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantityError {
    /// The file contains no ranges at all
    #[error("File contains no data ranges")]
    NoRanges,

    /// A range lacks the THETA axis position needed for reciprocal-space maps
    #[error("Range {range} has no THETA axis value")]
    MissingTheta {
        /// Zero-based range index
        range: usize,
    },

    /// Ranges in a map have different sample counts
    #[error("Shape mismatch: range {range} has {actual} samples, expected {expected}")]
    ShapeMismatch {
        /// Zero-based range index
        range: usize,
        /// Sample count of the first range
        expected: usize,
        /// Sample count of this range
        actual: usize,
    },

    /// The wavelength is zero or not finite
    #[error("Invalid wavelength: {0}")]
    InvalidWavelength(f64),
}
