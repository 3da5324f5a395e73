//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE a pivot:
//! - which field is counted (the value descriptor)
//! - which fields, if any, partition it into columns and rows
//!
//! These are immutable snapshots created once at table-definition time.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELDS
// ============================================================================

/// Identifies one column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    /// Fully-qualified lookup key, `"<table>.<column>"`.
    pub property: String,

    /// Display label (the bare column name).
    pub name: String,
}

impl FieldRef {
    pub fn new(property: impl Into<String>, name: impl Into<String>) -> Self {
        FieldRef {
            property: property.into(),
            name: name.into(),
        }
    }

    /// Builds the field for `column` of `table`.
    pub fn qualified(table: &str, column: &str) -> Self {
        FieldRef {
            property: format!("{}.{}", table, column),
            name: column.to_string(),
        }
    }

    /// Describes this field aggregated with `kind`.
    pub fn aggregate(&self, kind: impl Into<AggregationKind>) -> ValueDescriptor {
        ValueDescriptor {
            field: self.clone(),
            kind: kind.into(),
        }
    }

    /// Describes the count of this field.
    pub fn count(&self) -> ValueDescriptor {
        self.aggregate(BuiltinAggregation::Count)
    }
}

// ============================================================================
// AGGREGATION KINDS
// ============================================================================

/// Aggregations shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinAggregation {
    Count,
}

impl BuiltinAggregation {
    pub const ALL: &'static [BuiltinAggregation] = &[BuiltinAggregation::Count];

    pub fn tag(self) -> &'static str {
        match self {
            BuiltinAggregation::Count => "count",
        }
    }
}

/// Tag naming an aggregation in the registry.
///
/// The set of valid tags is whatever has been registered, so a descriptor
/// can name a kind the registry does not know; building then fails with
/// `PivotError::UnknownAggregationKind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationKind(Cow<'static, str>);

impl AggregationKind {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        AggregationKind(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<BuiltinAggregation> for AggregationKind {
    fn from(builtin: BuiltinAggregation) -> Self {
        AggregationKind(Cow::Borrowed(builtin.tag()))
    }
}

impl From<&'static str> for AggregationKind {
    fn from(tag: &'static str) -> Self {
        AggregationKind(Cow::Borrowed(tag))
    }
}

impl From<String> for AggregationKind {
    fn from(tag: String) -> Self {
        AggregationKind(Cow::Owned(tag))
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// VALUE DESCRIPTOR
// ============================================================================

/// The field being aggregated and how.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueDescriptor {
    pub field: FieldRef,
    pub kind: AggregationKind,
}

impl ValueDescriptor {
    pub fn new(field: FieldRef, kind: impl Into<AggregationKind>) -> Self {
        ValueDescriptor {
            field,
            kind: kind.into(),
        }
    }

    pub fn property(&self) -> &str {
        &self.field.property
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }
}

// ============================================================================
// AXIS ROLE
// ============================================================================

/// Which axis a dimension is laid out on. Decides header ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisRole {
    /// Headers keep first-seen order.
    Column,
    /// Headers are sorted ascending.
    Row,
}
