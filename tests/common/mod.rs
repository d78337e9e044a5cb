//! Synthetic RAW4 files shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

fn fixed(text: &str, len: usize) -> Vec<u8> {
    let mut field = vec![0u8; len];
    field[..text.len()].copy_from_slice(text.as_bytes());
    field
}

fn segment(code: u32, payload: &[u8]) -> Vec<u8> {
    let mut seg = code.to_le_bytes().to_vec();
    seg.extend_from_slice(&(payload.len() as u32 + 8).to_le_bytes());
    seg.extend_from_slice(payload);
    seg
}

/// One range of a synthetic file.
#[derive(Clone)]
pub struct Scan {
    pub scan_type: &'static str,
    pub start: f64,
    pub step: f64,
    pub time_per_step: f32,
    pub lambda: f64,
    pub axes: Vec<(&'static str, f64)>,
    pub counts: Vec<f32>,
}

impl Scan {
    /// Locked-coupled line scan, 1 s per step.
    pub fn line(start: f64, step: f64, counts: &[f32]) -> Self {
        Self {
            scan_type: "Locked Coupled",
            start,
            step,
            time_per_step: 1.0,
            lambda: 1.5406,
            axes: Vec::new(),
            counts: counts.to_vec(),
        }
    }

    /// One row of a reciprocal space map at fixed omega.
    pub fn rsm_row(omega: f64, start: f64, step: f64, counts: &[f32]) -> Self {
        Self {
            scan_type: "Unlocked Coupled",
            axes: vec![("Theta", omega), ("Phi", 0.0)],
            ..Self::line(start, step, counts)
        }
    }

    pub fn dwell(mut self, seconds: f32) -> Self {
        self.time_per_step = seconds;
        self
    }

    fn encode(&self, sentinel: u32, out: &mut Vec<u8>) {
        let sub_header: Vec<u8> = self
            .axes
            .iter()
            .flat_map(|(label, value)| {
                let mut payload = vec![0u8; 4];
                payload.extend(fixed(label, 24));
                payload.extend(vec![0u8; 20]);
                payload.extend_from_slice(&value.to_le_bytes());
                segment(50, &payload)
            })
            .collect();

        out.extend_from_slice(&sentinel.to_le_bytes());
        out.extend(vec![0u8; 28]);
        out.extend(fixed(self.scan_type, 24));
        out.extend(vec![0u8; 16]);
        out.extend_from_slice(&self.start.to_le_bytes());
        out.extend_from_slice(&self.step.to_le_bytes());
        out.extend_from_slice(&(self.counts.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.time_per_step.to_le_bytes());
        out.extend(vec![0u8; 4]);
        out.extend_from_slice(&40.0f32.to_le_bytes());
        out.extend_from_slice(&40.0f32.to_le_bytes());
        out.extend(vec![0u8; 4]);
        out.extend_from_slice(&self.lambda.to_le_bytes());
        out.extend(vec![0u8; 16]);
        out.extend_from_slice(&4u32.to_le_bytes());
        out.extend_from_slice(&(sub_header.len() as u32).to_le_bytes());
        out.extend(vec![0u8; 16]);
        out.extend(sub_header);
        for c in &self.counts {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
}

/// File header, optional hardware segment, a var-info tag and the given ranges.
pub fn raw_file(hardware_lambda: Option<f64>, scans: &[Scan]) -> Vec<u8> {
    let mut bytes = fixed("RAW4", 4);
    bytes.extend(vec![0u8; 8]);
    bytes.extend(fixed("03/02/2024", 12));
    bytes.extend(fixed("09:15:00", 10));
    bytes.extend(vec![0u8; 27]);

    let mut var_info = vec![0u8; 4];
    var_info.extend(fixed("SAMPLE", 24));
    var_info.extend(fixed("GaN on sapphire", 20));
    bytes.extend(segment(10, &var_info));

    if let Some(lambda) = hardware_lambda {
        let mut payload = vec![0u8; 64];
        for v in [lambda, 1.5406, 1.54439, 1.39222, 0.5] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        payload.extend(vec![0u8; 4]);
        payload.extend(fixed("Cu", 4));
        payload.extend(vec![0u8; 16]);
        bytes.extend(segment(30, &payload));
    }

    for (i, scan) in scans.iter().enumerate() {
        scan.encode(if i % 2 == 0 { 0 } else { 160 }, &mut bytes);
    }
    bytes
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
