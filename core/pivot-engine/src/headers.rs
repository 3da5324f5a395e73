//! FILENAME: core/pivot-engine/src/headers.rs
//! Header extraction - distinct values of one dimension.
//!
//! Column headers keep the order in which values are first seen in the
//! data. Row headers are sorted ascending by the natural value ordering.
//! A record missing the dimension field contributes `Value::Undefined` as
//! a header of its own rather than being skipped.

use engine::{Dataset, Record, Value};
use rustc_hash::FxHashSet;
use serde::ser::{Serialize, Serializer};

use crate::definition::{AxisRole, FieldRef};

/// The headers of one dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderSet {
    /// The dimension was not requested; it is not a matrix axis.
    Absent,
    /// The dimension was requested but the data is not loaded yet.
    Pending,
    /// Distinct values, ordered by role.
    Values(Vec<Value>),
}

impl HeaderSet {
    pub fn is_absent(&self) -> bool {
        matches!(self, HeaderSet::Absent)
    }

    /// Header values; empty for both `Absent` and `Pending`.
    pub fn values(&self) -> &[Value] {
        match self {
            HeaderSet::Values(values) => values,
            HeaderSet::Absent | HeaderSet::Pending => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

impl Serialize for HeaderSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HeaderSet::Absent => serializer.serialize_none(),
            HeaderSet::Pending => Vec::<Value>::new().serialize(serializer),
            HeaderSet::Values(values) => values.serialize(serializer),
        }
    }
}

/// Collects the distinct values of `field` across `records`, first-seen order.
pub fn distinct_values(records: &[Record], field: &FieldRef) -> Vec<Value> {
    let mut seen: FxHashSet<&Value> = FxHashSet::default();
    let mut ordered = Vec::new();

    for record in records {
        let value = record.get(&field.property);
        if seen.insert(value) {
            ordered.push(value.clone());
        }
    }

    ordered
}

/// Extracts the header set for one dimension.
pub fn extract_headers(dataset: &Dataset, dimension: Option<&FieldRef>, role: AxisRole) -> HeaderSet {
    let field = match dimension {
        Some(field) => field,
        None => return HeaderSet::Absent,
    };

    let records = match dataset.records() {
        Some(records) => records,
        None => return HeaderSet::Pending,
    };

    let mut values = distinct_values(records, field);
    if role == AxisRole::Row {
        values.sort();
    }

    HeaderSet::Values(values)
}
