//! # rawxrd - Bruker RAW4 Diffractometer Files
//!
//! `rawxrd` decodes the version 4 `.raw` files written by Bruker D8
//! diffractometers and turns them into plain numeric tables. X-ray
//! reflectivity and diffraction line scans, rocking curves and reciprocal
//! space maps are all stored as one or more *ranges* behind a block of global
//! metadata.
//!
//! ## Key Features
//!
//! - **Single-pass decoding**: the whole file is read once into memory and
//!   decoded with a bounds-checked cursor; truncated or inconsistent input is
//!   reported as an error with the offending offset, never a panic.
//!
//! - **Typed metadata**: hardware, drive alignment and sample alignment
//!   segments decode into structs, with an insertion-ordered flat view for
//!   dumps.
//!
//! - **Physical quantities**: 2θ, ω and intensities as decoded, or momentum
//!   transfer (q, qx/qz) in nm⁻¹ and counts instead of counts per second.
//!
//! - **Export**: whitespace-aligned `.asc` tables and a JSON structure dump.
//!
//! - **FMR**: Bruker EMX `.spc`/`.par` ferromagnetic resonance pairs to CSV.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rawxrd::quantities::{MeasurementData, XUnit, YUnit};
//! use rawxrd::raw4::RawFile;
//!
//! let raw = RawFile::open("xrr.raw")?;
//! println!("measured {} {}", raw.meta.measure_date, raw.meta.measure_time);
//!
//! match raw.data(XUnit::Reciprocal, YUnit::Cps)? {
//!     MeasurementData::Line { x, y } => println!("{} points, q up to {:?}", y.len(), x.last()),
//!     MeasurementData::Map { z, .. } => println!("map with {} ranges", z.len()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Batch Conversion
//!
//! ```rust,no_run
//! use rawxrd::converter::RawConverter;
//!
//! let report = RawConverter::new().convert_batch(&["a.raw", "b.raw"]);
//! println!("{}", report);
//! ```
//!
//! ## Architecture
//!
//! - [`raw4`]: cursor, segment headers, global metadata and range decoding
//! - [`quantities`]: unit conversion of decoded ranges
//! - [`export`]: ASC and JSON writers
//! - [`converter`]: per-file RAW to ASC pipeline and batch driver
//! - [`report`]: per-file outcome summary for batches
//! - [`fmr`]: Bruker EMX FMR files

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod converter;
pub mod export;
pub mod fmr;
pub mod quantities;
pub mod raw4;
pub mod report;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::converter::{ConversionConfig, ConversionError, ConversionStats, RawConverter};
    pub use crate::export::{asc_path, save_asc, to_json_pretty, write_asc, ExportError};
    pub use crate::fmr::{convert_spc, FmrError, FmrMeasurement, ScanParams};
    pub use crate::quantities::{MeasurementData, QuantityError, XUnit, YUnit};
    pub use crate::raw4::{
        Axis, DataRange, DriveInfo, GlobalMetadata, HardwareInfo, MetaMap, MetaValue, Raw4Error,
        RawFile, ScanKind,
    };
    pub use crate::report::{ConversionReport, FileOutcome, FileStatus};
}
