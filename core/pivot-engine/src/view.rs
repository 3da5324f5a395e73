//! FILENAME: core/pivot-engine/src/view.rs
//! Pivot View - Renderable layout for the presentation layer.
//!
//! Lays a `PivotResult` out as a header row plus body rows of typed cells.
//! The presentation layer decides how each cell type looks; nothing here
//! knows about styling.
//!
//! Layout:
//! - Header row: the row dimension's name in the corner (only with a row
//!   dimension), then one cell per column header, or the value label when
//!   there is no column dimension.
//! - Body: one row per row header (label then cells) with a row dimension,
//!   otherwise a single row holding the scalar or the row vector.

use serde::{Deserialize, Serialize};

use crate::definition::FieldRef;
use crate::engine::{Matrix, PivotResult};

// ============================================================================
// CELL TYPES
// ============================================================================

/// The type of a cell in the pivot view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotCellType {
    /// Top-left cell naming the row dimension.
    Corner,
    /// Column header label.
    ColumnHeader,
    /// Header naming the aggregated value (no column dimension).
    ValueLabel,
    /// Row header label.
    RowHeader,
    /// Aggregated value.
    Data,
}

/// Display value for a pivot cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PivotCellValue {
    Number(f64),
    Text(String),
}

/// A single cell in the pivot view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotViewCell {
    pub value: PivotCellValue,
    pub cell_type: PivotCellType,
    /// Pre-formatted display string.
    pub formatted_value: String,
}

impl PivotViewCell {
    pub fn data(value: f64) -> Self {
        PivotViewCell {
            formatted_value: format_number(value),
            value: PivotCellValue::Number(value),
            cell_type: PivotCellType::Data,
        }
    }

    fn label(text: String, cell_type: PivotCellType) -> Self {
        PivotViewCell {
            value: PivotCellValue::Text(text.clone()),
            formatted_value: text,
            cell_type,
        }
    }

    pub fn corner(text: String) -> Self {
        Self::label(text, PivotCellType::Corner)
    }

    pub fn column_header(text: String) -> Self {
        Self::label(text, PivotCellType::ColumnHeader)
    }

    pub fn value_label(text: String) -> Self {
        Self::label(text, PivotCellType::ValueLabel)
    }

    pub fn row_header(text: String) -> Self {
        Self::label(text, PivotCellType::RowHeader)
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// The complete layout of one pivot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotView {
    /// True while data is loading; `header` and `body` are empty.
    pub is_placeholder: bool,
    pub header: Vec<PivotViewCell>,
    pub body: Vec<Vec<PivotViewCell>>,
}

impl PivotView {
    pub fn placeholder() -> Self {
        PivotView {
            is_placeholder: true,
            header: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Lays out `result`. `row` is the row dimension the result was built
    /// with; its display name goes in the corner cell.
    pub fn from_result(result: &PivotResult, row: Option<&FieldRef>) -> Self {
        if result.matrix.is_pending() {
            return Self::placeholder();
        }

        let mut header = Vec::new();
        if let Some(row_field) = row {
            header.push(PivotViewCell::corner(row_field.name.clone()));
        }
        if result.column_headers.is_absent() {
            header.push(PivotViewCell::value_label(result.value_label.clone()));
        } else {
            header.extend(
                result
                    .column_headers
                    .values()
                    .iter()
                    .map(|v| PivotViewCell::column_header(v.display_value())),
            );
        }

        let body = match &result.matrix {
            Matrix::Pending => Vec::new(),
            Matrix::Scalar(v) => vec![vec![PivotViewCell::data(*v)]],
            Matrix::RowVector(cells) => vec![cells.iter().copied().map(PivotViewCell::data).collect()],
            Matrix::ColumnVector(cells) => result
                .row_headers
                .values()
                .iter()
                .zip(cells)
                .map(|(label, v)| vec![PivotViewCell::row_header(label.display_value()), PivotViewCell::data(*v)])
                .collect(),
            Matrix::Grid(rows) => result
                .row_headers
                .values()
                .iter()
                .zip(rows)
                .map(|(label, cells)| {
                    std::iter::once(PivotViewCell::row_header(label.display_value()))
                        .chain(cells.iter().copied().map(PivotViewCell::data))
                        .collect()
                })
                .collect(),
        };

        PivotView {
            is_placeholder: false,
            header,
            body,
        }
    }

    /// Column count of the widest row.
    pub fn column_count(&self) -> usize {
        self.body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}
