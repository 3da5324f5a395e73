//! FILENAME: app/server/src/fetch.rs
//! Fetch query parsing and row projection.
//!
//! A fetch names the fields it wants as `?fields=<table>.<col>,...`. Source
//! rows are keyed by bare column name; the projection re-keys them by the
//! qualified property and keeps only the requested columns.

use engine::Record;
use pivot_engine::{FieldRef, ValueDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One row as the data source returns it, keyed by column name.
pub type SourceRow = Map<String, JsonValue>;

/// Body of a successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub values: Vec<SourceRow>,
}

/// Same body, decoded into records on the client side.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchPayload {
    pub values: Vec<Record>,
}

/// Reads the `fields` parameter from a raw query string. A repeated
/// parameter keeps its first occurrence.
pub fn parse_fields(raw_query: Option<&str>) -> Vec<String> {
    let Some(query) = raw_query else {
        return Vec::new();
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "fields")
        .map(|(_, value)| {
            value
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Projects source rows onto `fields`.
///
/// The table name comes from the first field; each field contributes the
/// column after its first '.'. Columns missing from a row are left out of
/// that row's output.
pub fn project(rows: &[SourceRow], fields: &[String]) -> Vec<SourceRow> {
    let table = fields
        .first()
        .map(|f| f.split_once('.').map_or(f.as_str(), |(t, _)| t))
        .unwrap_or_default();
    let columns: Vec<&str> = fields
        .iter()
        .filter_map(|f| f.split_once('.').map(|(_, column)| column))
        .collect();

    rows.iter()
        .map(|row| {
            columns
                .iter()
                .filter_map(|column| {
                    row.get(*column)
                        .map(|v| (format!("{}.{}", table, column), v.clone()))
                })
                .collect()
        })
        .collect()
}

/// Properties a client requests for one pivot: the value first, then the
/// dimensions that are present.
pub fn fetch_fields(value: &ValueDescriptor, columns: Option<&FieldRef>, rows: Option<&FieldRef>) -> Vec<String> {
    std::iter::once(value.property())
        .chain(columns.map(|f| f.property.as_str()))
        .chain(rows.map(|f| f.property.as_str()))
        .map(str::to_string)
        .collect()
}
