use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use rawxrd::quantities::{XUnit, YUnit};

mod config;
mod convert;
mod dump;
mod fmr;
mod info;

/// rawxrd - Bruker RAW4 diffractometer file converter
#[derive(Parser)]
#[command(name = "rawxrd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Units for the angular column.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum XUnitArg {
    /// 2theta (and omega) in degrees
    Deg,
    /// Momentum transfer in inverse nanometres
    Reciprocal,
}

/// Units for the intensity column.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum YUnitArg {
    /// Counts per second
    Cps,
    /// Integrated counts per step
    Counts,
}

impl From<XUnitArg> for XUnit {
    fn from(arg: XUnitArg) -> Self {
        match arg {
            XUnitArg::Deg => XUnit::Deg,
            XUnitArg::Reciprocal => XUnit::Reciprocal,
        }
    }
}

impl From<YUnitArg> for YUnit {
    fn from(arg: YUnitArg) -> Self {
        match arg {
            YUnitArg::Cps => YUnit::Cps,
            YUnitArg::Counts => YUnit::Counts,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Bruker .raw files to .asc tables next to each input
    Convert {
        /// Input .raw files
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Angular units (default: deg)
        #[arg(short = 'x', long, value_enum)]
        x_unit: Option<XUnitArg>,

        /// Intensity units (default: counts)
        #[arg(short = 'y', long, value_enum)]
        y_unit: Option<YUnitArg>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Replace existing .asc files
        #[arg(long)]
        overwrite: bool,

        /// Convert files in parallel (requires the parallel feature)
        #[arg(long)]
        parallel: bool,
    },

    /// Print the decoded structure of a .raw file as JSON
    Dump {
        /// Input .raw file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Display a summary of a .raw file
    Info {
        /// Input .raw file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Convert Bruker EMX .spc/.par pairs to CSV
    Fmr {
        /// Input .spc files (the .par must sit next to each)
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Replace existing CSV files
        #[arg(long)]
        overwrite: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            files,
            x_unit,
            y_unit,
            config,
            overwrite,
            parallel,
        } => convert::run(
            files,
            x_unit.map(XUnit::from),
            y_unit.map(YUnit::from),
            config,
            overwrite,
            parallel,
        ),
        Commands::Dump { file, output } => dump::run(file, output),
        Commands::Info { file } => info::run(file),
        Commands::Fmr {
            files,
            config,
            overwrite,
        } => fmr::run(files, config, overwrite),
    }
}
