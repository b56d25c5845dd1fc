//! Record and field value types for structured log records.
//!
//! A [`Record`] is an insertion-ordered mapping from field name to
//! [`FieldValue`]. The codec transform reads one field and writes one field
//! per invocation; everything else in the record is left untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value held by a single record field.
///
/// Text and opaque byte payloads are kept apart so that decoded binary data
/// survives without lossy UTF-8 conversion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Opaque 8-bit payload, produced by decode codecs for non-UTF-8 output.
    #[serde(skip_deserializing)]
    Bytes(Vec<u8>),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
}

impl FieldValue {
    /// Build a value from raw bytes: valid UTF-8 becomes `String`, anything
    /// else stays `Bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(s) => FieldValue::String(s),
            Err(e) => FieldValue::Bytes(e.into_bytes()),
        }
    }

    /// Byte view of text and binary values; `None` for every other kind.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::String(s) => Some(s.as_bytes()),
            FieldValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// `Null` is the "no value" marker.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Only `Null` and `Bool(false)` are falsy. Empty strings are truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, FieldValue::Null | FieldValue::Bool(false))
    }

    /// Short kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::List(_) => "list",
            FieldValue::Map(_) => "map",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            FieldValue::List(l) => write!(f, "{:?}", l),
            FieldValue::Map(m) => write!(f, "{:?}", m),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(b: Vec<u8>) -> Self {
        FieldValue::Bytes(b)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(b: &[u8]) -> Self {
        FieldValue::Bytes(b.to_vec())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// A structured log record: field name -> value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a field. An existing key keeps its position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Field value unless it is missing or `Null`.
    pub fn get_present(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Remove a field, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn into_inner(self) -> IndexMap<String, FieldValue> {
        self.fields
    }
}

impl From<IndexMap<String, FieldValue>> for Record {
    fn from(fields: IndexMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_utf8_becomes_string() {
        let value = FieldValue::from_bytes("Nicolas Cage".as_bytes().to_vec());
        assert_eq!(value, FieldValue::String("Nicolas Cage".to_string()));
    }

    #[test]
    fn test_from_bytes_binary_stays_bytes() {
        let value = FieldValue::from_bytes(vec![0xff, 0xfe, 0x00]);
        assert_eq!(value, FieldValue::Bytes(vec![0xff, 0xfe, 0x00]));
    }

    #[test]
    fn test_truthiness() {
        assert!(FieldValue::from("").is_truthy());
        assert!(FieldValue::Bytes(Vec::new()).is_truthy());
        assert!(FieldValue::Int(0).is_truthy());
        assert!(!FieldValue::Null.is_truthy());
        assert!(!FieldValue::Bool(false).is_truthy());
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let mut record = Record::new()
            .with_field("b", "1")
            .with_field("a", "2");
        record.insert("c", "3");
        record.insert("b", "overwritten");

        let keys: Vec<_> = record.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(record.get("b"), Some(&FieldValue::from("overwritten")));
    }

    #[test]
    fn test_get_present_skips_null() {
        let record = Record::new()
            .with_field("present", "x")
            .with_field("null", FieldValue::Null);

        assert!(record.get_present("present").is_some());
        assert!(record.get_present("null").is_none());
        assert!(record.get_present("missing").is_none());
        assert!(record.contains_key("null"));
    }

    #[test]
    fn test_record_json_round_trip() {
        let json = r#"{"key1":"Tmljb2xhcyBDYWdl","count":3,"ratio":0.5,"ok":true,"none":null,"tags":["a","b"],"nested":{"x":1}}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get("count"), Some(&FieldValue::Int(3)));
        assert_eq!(record.get("ratio"), Some(&FieldValue::Float(0.5)));
        assert_eq!(record.get("ok"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get("none"), Some(&FieldValue::Null));
        assert!(matches!(record.get("tags"), Some(FieldValue::List(l)) if l.len() == 2));
        assert!(matches!(record.get("nested"), Some(FieldValue::Map(_))));

        let out = serde_json::to_string(&record).unwrap();
        assert_eq!(out, json);
    }

    #[test]
    fn test_bytes_serialize_as_byte_array() {
        let record = Record::new().with_field("bin", vec![0xffu8, 0x01]);
        let out = serde_json::to_string(&record).unwrap();
        assert_eq!(out, r#"{"bin":[255,1]}"#);
    }
}
