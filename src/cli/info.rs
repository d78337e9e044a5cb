use anyhow::{Context, Result};
use std::path::PathBuf;

use rawxrd::raw4::{Axis, RawFile};

/// Display a summary of a .raw file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let raw = RawFile::open(&file).with_context(|| format!("Failed to decode {}", file.display()))?;
    let meta = &raw.meta;

    println!("Bruker RAW File Information");
    println!("===========================");
    println!("File: {}", file.display());
    println!("Version: {}", meta.version);
    println!("Measured: {} {}", meta.measure_date, meta.measure_time);
    println!("Decoded: {} of {} bytes", raw.offset, raw.length);
    println!();

    if !meta.variables.is_empty() {
        println!("Variables:");
        for (tag, value) in meta.variables.iter() {
            println!("  {}: {}", tag, value);
        }
        println!();
    }

    if let Some(hw) = &meta.hardware {
        println!("Hardware:");
        println!("  Anode: {}", hw.anode_material);
        println!("  Kα average: {} Å", hw.alpha_average);
        println!("  Kα1 / Kα2: {} / {} Å", hw.alpha1, hw.alpha2);
        println!("  Kβ: {} Å", hw.beta);
        println!();
    }

    if !meta.drives.is_empty() {
        println!("Drives:");
        for (i, drive) in meta.drives.iter().enumerate() {
            println!(
                "  {:2}. {} (delta {}, flag {})",
                i, drive.name, drive.delta, drive.align_flag
            );
        }
        println!();
    }

    println!("Ranges: {}", raw.ranges.len());
    for (i, range) in raw.ranges.iter().enumerate() {
        let header = &range.header;
        println!(
            "  {:3}. {} - {} steps from {} by {}, {} s/step",
            i,
            header.scan_type.name(),
            header.steps,
            header.start_angle,
            header.step_size,
            header.time_per_step
        );
        if range.is_unknown() {
            println!("       samples skipped (unrecognized scan type)");
        }
        let positions: Vec<String> = Axis::ALL
            .iter()
            .filter_map(|&axis| range.axis(axis).map(|v| format!("{}={}", axis.label(), v)))
            .collect();
        if !positions.is_empty() {
            println!("       {}", positions.join(", "));
        }
    }

    Ok(())
}
