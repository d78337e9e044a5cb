#![no_main]

use libfuzzer_sys::fuzz_target;
use rawxrd::fmr::{split_sweeps, ScanParams};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    if let Ok(params) = ScanParams::parse(&text) {
        // Shape checks must reject mismatched signals without panicking
        let signal = vec![0f32; params.file_length.min(4096)];
        let _ = split_sweeps(&params, &signal);
    }
});
