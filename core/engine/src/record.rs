//! FILENAME: core/engine/src/record.rs
//! PURPOSE: Records keyed by fully-qualified property, and the dataset
//! state handed to the pivot engine.
//! CONTEXT: A `Dataset` is either still pending (the data source has not
//! answered yet) or loaded. Loaded records are shared behind an `Arc` so
//! that callers can cheaply tell whether two datasets are the same fetch.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::{Value, UNDEFINED};

/// One row of tabular data, keyed by `"<table>.<column>"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: FxHashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            fields: FxHashMap::default(),
        }
    }

    /// Builds a record from `(property, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Record {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Looks up a field. Missing fields read as `Value::Undefined`.
    pub fn get(&self, property: &str) -> &Value {
        self.fields.get(property).unwrap_or(&UNDEFINED)
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(property.into(), value.into());
    }

    pub fn contains(&self, property: &str) -> bool {
        self.fields.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Undefined entries are dropped, matching what a JSON encoder does
        // with missing properties.
        let present: Vec<(&String, &Value)> = self
            .fields
            .iter()
            .filter(|(_, v)| !v.is_undefined())
            .collect();
        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (k, v) in present {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = FxHashMap::<String, Value>::deserialize(deserializer)?;
        Ok(Record { fields })
    }
}

/// The record sequence as seen by the pivot engine.
#[derive(Debug, Clone, Default)]
pub enum Dataset {
    /// The data source has not returned records yet.
    #[default]
    Pending,
    /// Records have arrived; the sequence may be empty.
    Loaded(Arc<[Record]>),
}

impl Dataset {
    pub fn loaded(records: Vec<Record>) -> Self {
        Dataset::Loaded(records.into())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Dataset::Pending)
    }

    /// Returns the records, or `None` while pending.
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Dataset::Pending => None,
            Dataset::Loaded(records) => Some(&records[..]),
        }
    }

    /// True when both datasets are pending or both point at the same
    /// loaded allocation. Structural equality is not checked.
    pub fn same_identity(&self, other: &Dataset) -> bool {
        match (self, other) {
            (Dataset::Pending, Dataset::Pending) => true,
            (Dataset::Loaded(a), Dataset::Loaded(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::loaded(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_reads_undefined() {
        let record = Record::from_pairs([("t.s", "A")]);
        assert_eq!(record.get("t.s"), &Value::text("A"));
        assert!(record.get("t.d").is_undefined());
    }

    #[test]
    fn test_decode_wire_record() {
        let record: Record =
            serde_json::from_str(r#"{"t.s": "A", "t.n": 3, "t.x": null}"#).unwrap();
        assert_eq!(record.get("t.s"), &Value::text("A"));
        assert_eq!(record.get("t.n"), &Value::Number(3.0));
        assert_eq!(record.get("t.x"), &Value::Null);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_encode_skips_undefined() {
        let mut record = Record::new();
        record.set("t.s", "A");
        record.set("t.gone", Value::Undefined);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"t.s": "A"}));
    }

    #[test]
    fn test_dataset_identity() {
        let a = Dataset::loaded(vec![Record::new()]);
        let b = a.clone();
        let c = Dataset::loaded(vec![Record::new()]);
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
        assert!(Dataset::Pending.same_identity(&Dataset::Pending));
        assert!(!Dataset::Pending.same_identity(&a));
    }

    #[test]
    fn test_empty_loaded_is_not_pending() {
        let empty = Dataset::loaded(Vec::new());
        assert!(!empty.is_pending());
        assert_eq!(empty.records().map(|r| r.len()), Some(0));
        assert!(Dataset::Pending.records().is_none());
    }
}
