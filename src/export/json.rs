//! Structure dump of a decoded file.

use serde::Serialize;

use crate::raw4::{MetaMap, RawFile};

use super::ExportError;

#[derive(Serialize)]
struct FileDump<'a> {
    offset: usize,
    length: usize,
    meta: MetaMap,
    ranges: Vec<RangeDump<'a>>,
}

#[derive(Serialize)]
struct RangeDump<'a> {
    meta: MetaMap,
    tt: Option<&'a [f64]>,
    #[serde(rename = "I")]
    intensities: Option<&'a [f64]>,
}

fn dump(raw: &RawFile) -> FileDump<'_> {
    FileDump {
        offset: raw.offset,
        length: raw.length,
        meta: raw.meta.to_meta_map(),
        ranges: raw
            .ranges
            .iter()
            .map(|r| RangeDump {
                meta: r.to_meta_map(),
                tt: r.x_values.as_deref(),
                intensities: r.intensities.as_deref(),
            })
            .collect(),
    }
}

/// Pretty-printed JSON with metadata keys in decode order.
///
/// Ranges whose samples were skipped render `tt` and `I` as `null`.
pub fn to_json_pretty(raw: &RawFile) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&dump(raw))?)
}

/// Same structure as [`to_json_pretty`], as a `serde_json::Value`.
pub fn to_json_value(raw: &RawFile) -> Result<serde_json::Value, ExportError> {
    Ok(serde_json::to_value(dump(raw))?)
}
