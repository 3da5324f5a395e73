//! FILENAME: tests/common/mod.rs
//! Fixtures for server integration tests.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bi_server::{define_table, MemorySource, SourceRow, TableDefinition};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub const NAMESPACE: &str = "bioreactor";

pub fn table() -> TableDefinition {
    define_table("bioreactor", &["species", "date", "reactor"])
}

/// Bioreactor samples as the data source returns them.
pub fn sample_rows() -> Vec<SourceRow> {
    let rows = json!([
        {"species": "E. coli", "date": "2021-03", "reactor": 1},
        {"species": "S. cerevisiae", "date": "2021-01", "reactor": 2},
        {"species": "E. coli", "date": "2021-01", "reactor": 1},
        {"species": "B. subtilis", "date": "2021-02", "reactor": 3},
        {"species": "E. coli", "date": "2021-02", "reactor": 2},
        {"species": "S. cerevisiae", "date": "2021-03", "reactor": 2},
        {"species": "E. coli", "date": "2021-03", "reactor": 3}
    ]);
    serde_json::from_value(rows).unwrap()
}

pub fn sample_app() -> Router {
    table().handler(MemorySource::new(sample_rows()), NAMESPACE)
}

/// Sends a GET through the router and returns status and parsed body
/// (`Null` for an empty body).
pub async fn get(app: Router, uri: &str) -> (StatusCode, JsonValue) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
