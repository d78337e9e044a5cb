//! # rawxrd
//!
//! Command-line converter for Bruker diffractometer and EMX files.
//!
//! ## Usage
//!
//! ```bash
//! # Convert RAW files to .asc tables (2theta in degrees, counts)
//! rawxrd convert *.raw
//!
//! # Reciprocal space, counts per second
//! rawxrd convert --x-unit reciprocal --y-unit cps rsm.raw
//!
//! # Inspect a file
//! rawxrd info scan.raw
//! rawxrd dump scan.raw -o scan.json
//!
//! # FMR sweeps to CSV
//! rawxrd fmr 10.spc
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
