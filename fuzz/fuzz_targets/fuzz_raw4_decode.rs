#![no_main]

use libfuzzer_sys::fuzz_target;
use rawxrd::quantities::{XUnit, YUnit};
use rawxrd::raw4::RawFile;

fuzz_target!(|data: &[u8]| {
    // Decoding must either succeed or return an error; it should NEVER panic
    if let Ok(raw) = RawFile::decode(data) {
        assert!(raw.offset <= raw.length);

        // Derived quantities and the dump must cope with whatever was decoded
        let _ = raw.data(XUnit::Reciprocal, YUnit::Counts);
        let _ = raw.data(XUnit::Deg, YUnit::Cps);
        let _ = rawxrd::export::to_json_value(&raw);
    }
});
