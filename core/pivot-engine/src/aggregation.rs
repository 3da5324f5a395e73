//! FILENAME: core/pivot-engine/src/aggregation.rs
//! Aggregation - computes one cell value over the records a cell selects.
//!
//! Kinds are looked up in an `AggregationRegistry` keyed by tag, so new
//! aggregations are added by registering another `Aggregation` without
//! touching the pivot builder. Built-in kinds are listed by
//! `BuiltinAggregation` and wired up by an exhaustive match.
//!
//! Every invocation re-scans the records once. Pivots here are small, so
//! no bucketed single-pass cross-tabulation is attempted.

use engine::{Record, Value};
use rustc_hash::FxHashMap;

use crate::definition::{AggregationKind, BuiltinAggregation, FieldRef};
use crate::error::PivotError;

// ============================================================================
// PREDICATES
// ============================================================================

/// Selects records whose `property` equals `expected`.
#[derive(Debug, Clone, Copy)]
pub struct FieldMatch<'a> {
    pub property: &'a str,
    pub expected: &'a Value,
}

impl<'a> FieldMatch<'a> {
    pub fn new(field: &'a FieldRef, expected: &'a Value) -> Self {
        FieldMatch {
            property: &field.property,
            expected,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.get(self.property) == self.expected
    }
}

/// The predicates selecting the records of one cell.
/// A predicate that is not supplied holds for every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellPredicate<'a> {
    pub column: Option<FieldMatch<'a>>,
    pub row: Option<FieldMatch<'a>>,
}

impl<'a> CellPredicate<'a> {
    /// Selects every record.
    pub fn all() -> Self {
        CellPredicate::default()
    }

    pub fn column(column: FieldMatch<'a>) -> Self {
        CellPredicate {
            column: Some(column),
            row: None,
        }
    }

    pub fn row(row: FieldMatch<'a>) -> Self {
        CellPredicate {
            column: None,
            row: Some(row),
        }
    }

    pub fn both(column: FieldMatch<'a>, row: FieldMatch<'a>) -> Self {
        CellPredicate {
            column: Some(column),
            row: Some(row),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.column.map_or(true, |m| m.matches(record))
            && self.row.map_or(true, |m| m.matches(record))
    }
}

// ============================================================================
// AGGREGATION TRAIT
// ============================================================================

/// One aggregation function.
pub trait Aggregation: Send + Sync {
    /// Header label for the aggregated field, e.g. "Count of species".
    fn label(&self, field_name: &str) -> String;

    /// Aggregates `value` over the records selected by `predicate`.
    fn aggregate(&self, records: &[Record], value: &FieldRef, predicate: &CellPredicate<'_>) -> f64;
}

/// Number of records selected by the predicate. The value field is not read.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl Aggregation for Count {
    fn label(&self, field_name: &str) -> String {
        format!("Count of {}", field_name)
    }

    fn aggregate(&self, records: &[Record], _value: &FieldRef, predicate: &CellPredicate<'_>) -> f64 {
        records.iter().filter(|r| predicate.matches(r)).count() as f64
    }
}

impl BuiltinAggregation {
    fn implementation(self) -> Box<dyn Aggregation> {
        match self {
            BuiltinAggregation::Count => Box::new(Count),
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Maps aggregation tags to their implementations.
pub struct AggregationRegistry {
    entries: FxHashMap<AggregationKind, Box<dyn Aggregation>>,
}

impl AggregationRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        AggregationRegistry {
            entries: FxHashMap::default(),
        }
    }

    /// A registry holding every built-in aggregation.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for &builtin in BuiltinAggregation::ALL {
            registry.entries.insert(builtin.into(), builtin.implementation());
        }
        registry
    }

    /// Registers (or replaces) the implementation for `kind`.
    pub fn register(&mut self, kind: impl Into<AggregationKind>, aggregation: impl Aggregation + 'static) {
        let kind = kind.into();
        log::debug!(target: "PIVOT", "registering aggregation '{}'", kind);
        self.entries.insert(kind, Box::new(aggregation));
    }

    pub fn contains(&self, kind: &AggregationKind) -> bool {
        self.entries.contains_key(kind)
    }

    /// Looks up the implementation for `kind`.
    pub fn resolve(&self, kind: &AggregationKind) -> Result<&dyn Aggregation, PivotError> {
        self.entries
            .get(kind)
            .map(|agg| &**agg)
            .ok_or_else(|| PivotError::UnknownAggregationKind(kind.clone()))
    }

    /// Computes one aggregated value.
    pub fn aggregate(
        &self,
        records: &[Record],
        kind: &AggregationKind,
        value: &FieldRef,
        predicate: &CellPredicate<'_>,
    ) -> Result<f64, PivotError> {
        Ok(self.resolve(kind)?.aggregate(records, value, predicate))
    }
}

impl Default for AggregationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for AggregationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&AggregationKind> = self.entries.keys().collect();
        kinds.sort();
        f.debug_struct("AggregationRegistry").field("kinds", &kinds).finish()
    }
}
