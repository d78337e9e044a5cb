//! Bruker EMX ferromagnetic resonance files.
//!
//! A measurement is a pair: `<name>.par` (plain-text parameters) and
//! `<name>.spc` (raw little-endian `f32` signal). 2D angle-sweep files hold
//! one field sweep per goniometer angle.

mod par;
mod spc;

use std::path::PathBuf;

use thiserror::Error;

pub use par::{ScanParams, SecondAxis};
pub use spc::{
    convert_spc, par_path_for, read_signal, split_sweeps, write_sweep_csv, FmrMeasurement, FmrStats,
    Sweep,
};

/// Errors reading or converting FMR files.
#[derive(Error, Debug)]
pub enum FmrError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A required `.par` key is absent
    #[error("Missing parameter: {0}")]
    MissingKey(String),

    /// A `.par` value could not be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Parameter key
        key: String,
        /// Raw value text
        value: String,
    },

    /// The signal length does not match the declared scan shape
    #[error("Signal has {actual} points, parameters declare {expected}")]
    ShapeMismatch {
        /// `y_num * x_res`
        expected: usize,
        /// Points read from the `.spc`
        actual: usize,
    },

    /// A 2D scan whose second axis is not an angle sweep
    #[error("Cannot interpret 2D scan with y scan type {0:?}")]
    Unsupported2D(Option<String>),

    /// The `.spc` byte length is not a whole number of `f32` values
    #[error("Signal file {path} has {len} bytes, not a multiple of 4")]
    RaggedSignal {
        /// Signal file path
        path: PathBuf,
        /// File length in bytes
        len: usize,
    },
}
