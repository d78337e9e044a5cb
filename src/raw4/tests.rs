use super::*;

/// Minimal RAW4 encoder for building synthetic test buffers.
#[derive(Default)]
struct RawBuilder {
    bytes: Vec<u8>,
}

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

fn axis_segment(label: &str, value: f64) -> Vec<u8> {
    let mut payload = vec![0u8; 4];
    payload.extend(fixed(label, 24));
    payload.extend(vec![0u8; 20]);
    payload.extend_from_slice(&value.to_le_bytes());
    segment(50, &payload)
}

struct RangeLayout<'a> {
    sentinel: u32,
    scan_type: &'a str,
    start: f64,
    step: f64,
    time_per_step: f32,
    lambda: f64,
    datum_size: u32,
    sub_segments: Vec<Vec<u8>>,
    counts: Vec<f32>,
}

impl Default for RangeLayout<'_> {
    fn default() -> Self {
        Self {
            sentinel: 0,
            scan_type: "Locked Coupled",
            start: 10.0,
            step: 0.5,
            time_per_step: 2.0,
            lambda: 1.5406,
            datum_size: 4,
            sub_segments: Vec::new(),
            counts: vec![2.0, 4.0, 6.0, 8.0, 10.0],
        }
    }
}

impl RawBuilder {
    fn new() -> Self {
        let mut b = Self::default();
        b.bytes.extend(fixed("RAW4", 4));
        b.bytes.extend(vec![0u8; 8]);
        b.bytes.extend(fixed("10/19/2025", 12));
        b.bytes.extend(fixed("18:40:31", 10));
        b.bytes.extend(vec![0u8; 27]);
        assert_eq!(b.bytes.len(), FILE_HEADER_LEN);
        b
    }

    fn var_info(mut self, tag: &str, value: &str) -> Self {
        let mut payload = vec![0u8; 4];
        payload.extend(fixed(tag, 24));
        payload.extend(fixed(value, value.len() + 4));
        self.bytes.extend(segment(10, &payload));
        self
    }

    fn hardware(mut self, alpha_average: f64, anode: &str) -> Self {
        let mut payload = vec![0u8; 64];
        for v in [alpha_average, 1.5406, 1.54439, 1.39222, 0.5] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        payload.extend(vec![0u8; 4]);
        payload.extend(fixed(anode, 4));
        payload.extend(vec![0u8; 16]);
        self.bytes.extend(segment(30, &payload));
        self
    }

    fn drive(mut self, flag: u32, name: &str, delta: f64) -> Self {
        let mut payload = flag.to_le_bytes().to_vec();
        payload.extend(fixed(name, 24));
        payload.extend(vec![0u8; 32]);
        payload.extend_from_slice(&delta.to_le_bytes());
        self.bytes.extend(segment(60, &payload));
        self
    }

    fn alignment(mut self) -> Self {
        let mut payload = vec![0u8; 8];
        payload.extend(fixed("0 0 1", 12));
        payload.extend(fixed("1 0 0", 12));
        payload.extend(vec![0u8; 40]);
        payload.extend(fixed("0 0 4", 12));
        payload.extend(fixed("2 2 0", 12));
        payload.extend(vec![0u8; 12]);
        self.bytes.extend(segment(5, &payload));
        self
    }

    fn raw_segment(mut self, code: u32, payload_len: usize) -> Self {
        self.bytes.extend(segment(code, &vec![0xAB; payload_len]));
        self
    }

    fn range(mut self, layout: RangeLayout<'_>) -> Self {
        let sub_header: Vec<u8> = layout.sub_segments.concat();
        let b = &mut self.bytes;
        let start = b.len();
        b.extend_from_slice(&layout.sentinel.to_le_bytes());
        b.extend(vec![0u8; 28]);
        b.extend(fixed(layout.scan_type, 24));
        b.extend(vec![0u8; 16]);
        b.extend_from_slice(&layout.start.to_le_bytes());
        b.extend_from_slice(&layout.step.to_le_bytes());
        b.extend_from_slice(&(layout.counts.len() as u32).to_le_bytes());
        b.extend_from_slice(&layout.time_per_step.to_le_bytes());
        b.extend(vec![0u8; 4]);
        b.extend_from_slice(&40.0f32.to_le_bytes());
        b.extend_from_slice(&40.0f32.to_le_bytes());
        b.extend(vec![0u8; 4]);
        b.extend_from_slice(&layout.lambda.to_le_bytes());
        b.extend(vec![0u8; 16]);
        b.extend_from_slice(&layout.datum_size.to_le_bytes());
        b.extend_from_slice(&(sub_header.len() as u32).to_le_bytes());
        b.extend(vec![0u8; 16]);
        assert_eq!(b.len() - start, RANGE_HEADER_LEN);
        b.extend(sub_header);
        for c in &layout.counts {
            b.extend_from_slice(&c.to_le_bytes());
        }
        self
    }

    fn build(self) -> Vec<u8> {
        self.bytes
    }
}

#[test]
fn test_var_info_round_trip() {
    let bytes = RawBuilder::new()
        .var_info("JON", "TestSystem")
        .range(RangeLayout::default())
        .build();

    let raw = RawFile::decode(&bytes).unwrap();
    assert_eq!(raw.meta.variable("JON"), Some("TestSystem"));
    assert_eq!(raw.meta.version, "RAW4");
    assert!(raw.meta.is_raw4());
    assert_eq!(raw.meta.measure_date, "10/19/2025");
    assert_eq!(raw.meta.measure_time, "18:40:31");
}

#[test]
fn test_single_range_samples() {
    let bytes = RawBuilder::new().range(RangeLayout::default()).build();
    let raw = RawFile::decode(&bytes).unwrap();

    assert_eq!(raw.ranges.len(), 1);
    let range = &raw.ranges[0];
    assert_eq!(range.header.scan_type, ScanKind::LockedCoupled);
    assert_eq!(range.header.steps, 5);
    assert_eq!(
        range.x_values.as_deref(),
        Some(&[10.0, 10.5, 11.0, 11.5, 12.0][..])
    );
    // counts divided by the 2 s dwell time
    assert_eq!(
        range.intensities.as_deref(),
        Some(&[1.0, 2.0, 3.0, 4.0, 5.0][..])
    );
    assert_eq!(raw.offset, bytes.len());
    assert_eq!(raw.length, bytes.len());
}

#[test]
fn test_hardware_drive_and_alignment_segments() {
    let bytes = RawBuilder::new()
        .alignment()
        .hardware(1.5418, "Cu")
        .drive(1, "Theta", 0.01)
        .drive(0, "2Theta", -0.02)
        .range(RangeLayout::default())
        .build();
    let raw = RawFile::decode(&bytes).unwrap();

    let hw = raw.meta.hardware.as_ref().unwrap();
    assert_eq!(hw.alpha_average, 1.5418);
    assert_eq!(hw.anode_material, "Cu");

    assert_eq!(raw.meta.drives.len(), 2);
    assert_eq!(raw.meta.drives[0].name, "Theta");
    assert_eq!(raw.meta.drives[0].align_flag, 1);
    assert_eq!(raw.meta.drives[1].delta, -0.02);

    let alignment = raw.meta.alignment.as_ref().unwrap();
    assert_eq!(alignment.substrate_normal, "0 0 1");
    assert_eq!(alignment.sample_azimuth, "2 2 0");

    let flat = raw.meta.to_meta_map();
    assert_eq!(flat.get_str("DRIVE1_NAME"), Some("2Theta"));
    assert_eq!(flat.get_f64("DRIVE0_ALIGN_FLAG"), Some(1.0));
    assert_eq!(flat.get_str("ANODE_MATERIAL"), Some("Cu"));
}

#[test]
fn test_unknown_global_segment_is_skipped() {
    let bytes = RawBuilder::new()
        .raw_segment(999, 37)
        .var_info("JON", "AfterUnknown")
        .range(RangeLayout::default())
        .build();
    let raw = RawFile::decode(&bytes).unwrap();
    assert_eq!(raw.meta.variable("JON"), Some("AfterUnknown"));
}

#[test]
fn test_short_global_segment_is_fatal() {
    let mut bytes = RawBuilder::new().build();
    bytes.extend_from_slice(&999u32.to_le_bytes());
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend(vec![0u8; 64]);

    let err = RawFile::decode(&bytes).unwrap_err();
    match err {
        Raw4Error::SegmentTooShort {
            offset,
            length,
            minimum,
            ..
        } => {
            assert_eq!(offset, FILE_HEADER_LEN);
            assert_eq!(length, 4);
            assert_eq!(minimum, 8);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_short_var_info_is_fatal() {
    let mut bytes = RawBuilder::new().build();
    bytes.extend_from_slice(&10u32.to_le_bytes());
    bytes.extend_from_slice(&20u32.to_le_bytes());
    bytes.extend(vec![0u8; 64]);

    let err = RawFile::decode(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Raw4Error::SegmentTooShort {
            segment: "VarInfo",
            minimum: 36,
            ..
        }
    ));
}

#[test]
fn test_truncated_global_metadata_is_fatal() {
    let bytes = RawBuilder::new().var_info("JON", "X").build();
    let err = RawFile::decode(&bytes[..bytes.len() - 2]).unwrap_err();
    assert!(err.is_truncation());
}

#[test]
fn test_axis_sub_segments() {
    let layout = RangeLayout {
        sub_segments: vec![
            axis_segment("Theta", 10.0),
            axis_segment("2Theta", 20.0),
            axis_segment("Unknown Axis", 99.0),
            segment(77, &[0u8; 12]),
            axis_segment("X-Drive", 1.25),
        ],
        ..Default::default()
    };
    let bytes = RawBuilder::new().range(layout).build();
    let raw = RawFile::decode(&bytes).unwrap();

    let range = &raw.ranges[0];
    assert_eq!(range.axis(Axis::Theta), Some(10.0));
    assert_eq!(range.axis(Axis::TwoTheta), Some(20.0));
    assert_eq!(range.axis(Axis::XDrive), Some(1.25));
    assert_eq!(range.axes.len(), 3);

    let flat = range.to_meta_map();
    assert_eq!(flat.get_f64("THETA"), Some(10.0));
    assert_eq!(flat.get_f64("2THETA"), Some(20.0));
    assert_eq!(flat.get_f64("X_DRIVE"), Some(1.25));
    assert!(!flat.contains_key("UNKNOWN_RANGE_SCAN_TYPE"));
    assert_eq!(range.len(), 5);
}

#[test]
fn test_short_axis_sub_segment_is_fatal() {
    let layout = RangeLayout {
        sub_segments: vec![segment(50, &[0u8; 40])],
        ..Default::default()
    };
    let bytes = RawBuilder::new().range(layout).build();
    let err = RawFile::decode(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Raw4Error::SegmentTooShort {
            segment: "Axis",
            length: 48,
            minimum: 64,
            ..
        }
    ));
}

#[test]
fn test_unexpected_datum_size_is_fatal() {
    let layout = RangeLayout {
        datum_size: 8,
        ..Default::default()
    };
    let bytes = RawBuilder::new().range(layout).build();
    let err = RawFile::decode(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Raw4Error::UnexpectedDatumSize {
            range: 0,
            datum_size: 8
        }
    ));
}

#[test]
fn test_unknown_scan_type_skips_payload() {
    let unknown = RangeLayout {
        scan_type: "Detector Scan",
        sub_segments: vec![axis_segment("Theta", 1.0)],
        counts: vec![9.0; 7],
        ..Default::default()
    };
    let known = RangeLayout {
        sentinel: 160,
        sub_segments: vec![axis_segment("Theta", 15.0)],
        ..Default::default()
    };
    let bytes = RawBuilder::new().range(unknown).range(known).build();
    let raw = RawFile::decode(&bytes).unwrap();

    assert_eq!(raw.ranges.len(), 2);
    let skipped = &raw.ranges[0];
    assert!(skipped.is_unknown());
    assert!(skipped.x_values.is_none());
    assert!(skipped.intensities.is_none());
    assert!(skipped.axes.is_empty());
    assert_eq!(
        skipped.to_meta_map().get_str("UNKNOWN_RANGE_SCAN_TYPE"),
        Some("true")
    );

    // The following range is still located correctly.
    let next = &raw.ranges[1];
    assert_eq!(next.axis(Axis::Theta), Some(15.0));
    assert_eq!(next.len(), 5);
    assert_eq!(raw.measured_ranges().count(), 1);
    assert_eq!(raw.offset, bytes.len());
}

#[test]
fn test_truncated_samples_are_fatal() {
    let bytes = RawBuilder::new().range(RangeLayout::default()).build();
    let err = RawFile::decode(&bytes[..bytes.len() - 3]).unwrap_err();
    assert!(err.is_truncation());
}

#[test]
fn test_partial_lookahead_is_end_of_input() {
    let mut bytes = RawBuilder::new().range(RangeLayout::default()).build();
    let end = bytes.len();
    bytes.extend_from_slice(&[0u8, 0]);

    let raw = RawFile::decode(&bytes).unwrap();
    assert_eq!(raw.ranges.len(), 1);
    assert_eq!(raw.offset, end);
    assert_eq!(raw.length, end + 2);
}

#[test]
fn test_non_sentinel_after_range_stops() {
    let mut bytes = RawBuilder::new().range(RangeLayout::default()).build();
    bytes.extend_from_slice(&42u32.to_le_bytes());
    bytes.extend(vec![0u8; 200]);

    let raw = RawFile::decode(&bytes).unwrap();
    assert_eq!(raw.ranges.len(), 1);
}

#[test]
fn test_sub_header_overrun_is_fatal() {
    let mut layout = RangeLayout::default();
    // Declares 80 bytes but the sub-header block holds only the 64-byte axis segment.
    let mut seg = axis_segment("Theta", 1.0);
    seg[4..8].copy_from_slice(&80u32.to_le_bytes());
    layout.sub_segments = vec![seg];
    let bytes = RawBuilder::new().range(layout).build();

    let err = RawFile::decode(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Raw4Error::SubHeaderOverrun {
            declared: 80,
            remaining: 64,
            ..
        }
    ));
}

#[test]
fn test_decode_is_idempotent() {
    let bytes = RawBuilder::new()
        .var_info("JON", "TestSystem")
        .hardware(1.5418, "Cu")
        .drive(1, "Phi", 0.5)
        .range(RangeLayout {
            sub_segments: vec![axis_segment("Theta", 10.0)],
            ..Default::default()
        })
        .range(RangeLayout {
            sentinel: 160,
            sub_segments: vec![axis_segment("Theta", 15.0)],
            ..Default::default()
        })
        .build();

    let first = RawFile::decode(&bytes).unwrap();
    let second = RawFile::decode(&bytes).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_x_positions_rounding() {
    assert_eq!(
        x_positions(10.0, 0.5, 5),
        vec![10.0, 10.5, 11.0, 11.5, 12.0]
    );
    // 0.1 steps accumulate binary error; rounding restores four decimals
    assert_eq!(x_positions(0.0, 0.1, 4), vec![0.0, 0.1, 0.2, 0.3]);
    assert!(x_positions(1.0, 1.0, 0).is_empty());
}

#[test]
fn test_x_positions_round_stored_value() {
    // 10.00005 and 10.00015 are stored just below the half-way point
    assert_eq!(
        x_positions(10.0, 0.00005, 4),
        vec![10.0, 10.0, 10.0001, 10.0001]
    );
    assert_eq!(x_positions(-1.0, 0.25, 3), vec![-1.0, -0.75, -0.5]);
}
