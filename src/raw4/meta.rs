//! Flat, insertion-ordered metadata view.
//!
//! The decoder stores fields in typed structs; [`MetaMap`] is the
//! key/value rendering of those structs used for dumps and for lookups by the
//! tag names the instrument software writes.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A metadata value as decoded from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Unsigned integer field
    Integer(u64),
    /// Floating point field
    Float(f64),
    /// Text field
    Text(String),
}

impl MetaValue {
    /// Text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Integer(v) => Some(*v as f64),
            MetaValue::Float(v) => Some(*v),
            MetaValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Integer(v) => write!(f, "{}", v),
            MetaValue::Float(v) => write!(f, "{}", v),
            MetaValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<f32> for MetaValue {
    fn from(value: f32) -> Self {
        MetaValue::Float(f64::from(value))
    }
}

impl From<u32> for MetaValue {
    fn from(value: u32) -> Self {
        MetaValue::Integer(u64::from(value))
    }
}

/// Insertion-ordered string-keyed map.
///
/// Re-inserting an existing key replaces the value in place and keeps the
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaMap {
    entries: Vec<(String, MetaValue)>,
    index: HashMap<String, usize>,
}

impl MetaMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Look up a text value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    /// Look up a numeric value.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(MetaValue::as_f64)
    }

    /// True if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Append every entry of `other`, replacing duplicates in place.
    pub fn extend(&mut self, other: MetaMap) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }
}

impl Serialize for MetaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
