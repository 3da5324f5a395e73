//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - turns a dataset and a pivot description into a matrix.
//!
//! Algorithm:
//! 1. Resolve the aggregation kind (fails before any cell is computed)
//! 2. Extract column headers (first-seen order) and row headers (sorted)
//! 3. Pick the matrix shape from which dimensions are present
//! 4. Fill every cell by aggregating under that cell's predicates

use engine::{Dataset, Record, Value};
use serde::Serialize;

use crate::aggregation::{Aggregation, AggregationRegistry, CellPredicate, FieldMatch};
use crate::definition::{AxisRole, FieldRef, ValueDescriptor};
use crate::error::PivotError;
use crate::headers::{extract_headers, HeaderSet};

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// The aggregated values, shaped by which dimensions are active.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "cells", rename_all = "camelCase")]
pub enum Matrix {
    /// Data is not loaded yet; render a placeholder.
    Pending,
    /// No dimensions: one total.
    Scalar(f64),
    /// Column dimension only: 1 x C.
    RowVector(Vec<f64>),
    /// Row dimension only: R x 1.
    ColumnVector(Vec<f64>),
    /// Both dimensions: R x C, indexed `[row][column]`.
    Grid(Vec<Vec<f64>>),
}

impl Matrix {
    pub fn is_pending(&self) -> bool {
        matches!(self, Matrix::Pending)
    }

    /// (rows, columns) of the matrix; `None` while pending.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        match self {
            Matrix::Pending => None,
            Matrix::Scalar(_) => Some((1, 1)),
            Matrix::RowVector(cells) => Some((1, cells.len())),
            Matrix::ColumnVector(cells) => Some((cells.len(), 1)),
            Matrix::Grid(rows) => Some((rows.len(), rows.first().map_or(0, Vec::len))),
        }
    }

    /// Sum of every cell; zero while pending.
    pub fn total(&self) -> f64 {
        match self {
            Matrix::Pending => 0.0,
            Matrix::Scalar(v) => *v,
            Matrix::RowVector(cells) | Matrix::ColumnVector(cells) => cells.iter().sum(),
            Matrix::Grid(rows) => rows.iter().flatten().sum(),
        }
    }
}

/// Everything the presentation boundary needs to draw one pivot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotResult {
    pub column_headers: HeaderSet,
    pub row_headers: HeaderSet,
    pub matrix: Matrix,
    /// Label of the aggregated field, e.g. "Count of species".
    pub value_label: String,
}

impl PivotResult {
    pub fn is_pending(&self) -> bool {
        self.matrix.is_pending()
    }
}

// ============================================================================
// PIVOT BUILDER
// ============================================================================

/// Builds pivot results against an aggregation registry.
pub struct PivotBuilder<'a> {
    registry: &'a AggregationRegistry,
}

impl<'a> PivotBuilder<'a> {
    pub fn new(registry: &'a AggregationRegistry) -> Self {
        PivotBuilder { registry }
    }

    /// Builds the pivot for `value`, partitioned by the optional dimensions.
    pub fn build(
        &self,
        dataset: &Dataset,
        value: &ValueDescriptor,
        column: Option<&FieldRef>,
        row: Option<&FieldRef>,
    ) -> Result<PivotResult, PivotError> {
        let aggregation = self.registry.resolve(&value.kind)?;
        let value_label = aggregation.label(value.name());

        let column_headers = extract_headers(dataset, column, AxisRole::Column);
        let row_headers = extract_headers(dataset, row, AxisRole::Row);

        let matrix = match dataset.records() {
            None => Matrix::Pending,
            Some(records) => {
                let cells = CellFiller {
                    aggregation,
                    records,
                    value: &value.field,
                };
                match (column, row) {
                    (None, None) => Matrix::Scalar(cells.fill(CellPredicate::all())),
                    (Some(col_field), None) => Matrix::RowVector(
                        column_headers
                            .values()
                            .iter()
                            .map(|c| cells.fill(CellPredicate::column(FieldMatch::new(col_field, c))))
                            .collect(),
                    ),
                    (None, Some(row_field)) => Matrix::ColumnVector(
                        row_headers
                            .values()
                            .iter()
                            .map(|r| cells.fill(CellPredicate::row(FieldMatch::new(row_field, r))))
                            .collect(),
                    ),
                    (Some(col_field), Some(row_field)) => Matrix::Grid(
                        row_headers
                            .values()
                            .iter()
                            .map(|r| cells.grid_row(col_field, column_headers.values(), FieldMatch::new(row_field, r)))
                            .collect(),
                    ),
                }
            }
        };

        log::debug!(
            target: "PIVOT",
            "built {} pivot of '{}' ({} columns x {} rows)",
            value.kind,
            value.property(),
            column_headers.len(),
            row_headers.len()
        );

        Ok(PivotResult {
            column_headers,
            row_headers,
            matrix,
            value_label,
        })
    }
}

/// Computes cells for one build. Holds the resolved aggregation so the
/// registry lookup happens once per build, not once per cell.
struct CellFiller<'a> {
    aggregation: &'a dyn Aggregation,
    records: &'a [Record],
    value: &'a FieldRef,
}

impl<'a> CellFiller<'a> {
    fn fill(&self, predicate: CellPredicate<'_>) -> f64 {
        self.aggregation.aggregate(self.records, self.value, &predicate)
    }

    fn grid_row(&self, col_field: &FieldRef, column_headers: &[Value], row_match: FieldMatch<'_>) -> Vec<f64> {
        column_headers
            .iter()
            .map(|c| self.fill(CellPredicate::both(FieldMatch::new(col_field, c), row_match)))
            .collect()
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Builds a pivot using the built-in aggregations.
/// This is the main entry point for the calculation engine.
pub fn build_pivot(
    dataset: &Dataset,
    value: &ValueDescriptor,
    column: Option<&FieldRef>,
    row: Option<&FieldRef>,
) -> Result<PivotResult, PivotError> {
    let registry = AggregationRegistry::builtin();
    PivotBuilder::new(&registry).build(dataset, value, column, row)
}

/// Computes a single aggregated value over `dataset` with optional
/// column/row predicates. A pending dataset aggregates as empty.
pub fn aggregate(
    registry: &AggregationRegistry,
    dataset: &Dataset,
    value: &ValueDescriptor,
    column_match: Option<FieldMatch<'_>>,
    row_match: Option<FieldMatch<'_>>,
) -> Result<f64, PivotError> {
    let records = dataset.records().unwrap_or(&[]);
    let predicate = CellPredicate {
        column: column_match,
        row: row_match,
    };
    registry.aggregate(records, &value.kind, &value.field, &predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::AggregationKind;

    fn species() -> FieldRef {
        FieldRef::qualified("t", "s")
    }

    fn date() -> FieldRef {
        FieldRef::qualified("t", "d")
    }

    fn create_test_dataset() -> Dataset {
        Dataset::loaded(vec![
            Record::from_pairs([("t.s", "A"), ("t.d", "2021")]),
            Record::from_pairs([("t.s", "A"), ("t.d", "2022")]),
            Record::from_pairs([("t.s", "B"), ("t.d", "2021")]),
        ])
    }

    #[test]
    fn test_scalar_without_dimensions() {
        let result = build_pivot(&create_test_dataset(), &species().count(), None, None).unwrap();
        assert_eq!(result.matrix, Matrix::Scalar(3.0));
        assert!(result.column_headers.is_absent());
        assert!(result.row_headers.is_absent());
        assert_eq!(result.value_label, "Count of s");
    }

    #[test]
    fn test_row_vector_for_column_dimension() {
        let result = build_pivot(&create_test_dataset(), &species().count(), Some(&species()), None).unwrap();
        assert_eq!(result.column_headers.values(), &[Value::text("A"), Value::text("B")]);
        assert_eq!(result.matrix, Matrix::RowVector(vec![2.0, 1.0]));
    }

    #[test]
    fn test_column_vector_uses_qualified_property() {
        let result = build_pivot(&create_test_dataset(), &species().count(), None, Some(&date())).unwrap();
        assert_eq!(result.row_headers.values(), &[Value::text("2021"), Value::text("2022")]);
        assert_eq!(result.matrix, Matrix::ColumnVector(vec![2.0, 1.0]));
    }

    #[test]
    fn test_grid_for_both_dimensions() {
        let result =
            build_pivot(&create_test_dataset(), &species().count(), Some(&species()), Some(&date())).unwrap();
        assert_eq!(result.column_headers.values(), &[Value::text("A"), Value::text("B")]);
        assert_eq!(result.row_headers.values(), &[Value::text("2021"), Value::text("2022")]);
        assert_eq!(result.matrix, Matrix::Grid(vec![vec![1.0, 1.0], vec![1.0, 0.0]]));
        assert_eq!(result.matrix.dimensions(), Some((2, 2)));
    }

    #[test]
    fn test_pending_ignores_dimensions() {
        for (col, row) in [(None, None), (Some(species()), None), (None, Some(date())), (Some(species()), Some(date()))] {
            let result = build_pivot(&Dataset::Pending, &species().count(), col.as_ref(), row.as_ref()).unwrap();
            assert!(result.is_pending());
        }
    }

    #[test]
    fn test_empty_dataset_yields_zeroes() {
        let empty = Dataset::loaded(Vec::new());
        let scalar = build_pivot(&empty, &species().count(), None, None).unwrap();
        assert_eq!(scalar.matrix, Matrix::Scalar(0.0));

        let grid = build_pivot(&empty, &species().count(), Some(&species()), Some(&date())).unwrap();
        assert_eq!(grid.column_headers, HeaderSet::Values(Vec::new()));
        assert_eq!(grid.row_headers, HeaderSet::Values(Vec::new()));
        assert_eq!(grid.matrix, Matrix::Grid(Vec::new()));
    }

    #[test]
    fn test_unknown_kind_fails_without_matrix() {
        let value = species().aggregate("median");
        let err = build_pivot(&create_test_dataset(), &value, Some(&species()), Some(&date())).unwrap_err();
        assert_eq!(err, PivotError::UnknownAggregationKind(AggregationKind::new("median")));

        // Also fails while pending: the kind is resolved first.
        assert!(build_pivot(&Dataset::Pending, &value, None, None).is_err());
    }

    #[test]
    fn test_missing_field_counts_in_undefined_bucket() {
        let data = Dataset::loaded(vec![
            Record::from_pairs([("t.s", "A"), ("t.d", "2021")]),
            Record::from_pairs([("t.d", "2021")]),
        ]);
        let result = build_pivot(&data, &species().count(), Some(&species()), None).unwrap();
        assert_eq!(result.column_headers.values(), &[Value::text("A"), Value::Undefined]);
        assert_eq!(result.matrix, Matrix::RowVector(vec![1.0, 1.0]));
    }

    #[test]
    fn test_single_aggregate() {
        let registry = AggregationRegistry::builtin();
        let a = Value::text("A");
        let s = species();
        let count = aggregate(&registry, &create_test_dataset(), &s.count(), Some(FieldMatch::new(&s, &a)), None).unwrap();
        assert_eq!(count, 2.0);
        assert_eq!(aggregate(&registry, &Dataset::Pending, &s.count(), None, None).unwrap(), 0.0);
    }

    #[test]
    fn test_matrix_serialization() {
        let json = serde_json::to_value(Matrix::RowVector(vec![2.0, 1.0])).unwrap();
        assert_eq!(json, serde_json::json!({"shape": "rowVector", "cells": [2.0, 1.0]}));
        let json = serde_json::to_value(Matrix::Pending).unwrap();
        assert_eq!(json, serde_json::json!({"shape": "pending"}));
    }
}
