//! FILENAME: app/server/src/routes.rs
//! HTTP routes.
//!
//! A single catch-all `GET /api/{*path}` dispatches on the path segments:
//! `/api/<namespace>/<action>`. Only the `fetch` action exists.

use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::fetch::{parse_fields, project, FetchResponse};
use crate::source::DataSource;
use crate::table::TableDefinition;
use crate::{log_debug, log_enter};

// ============================================================================
// STATE
// ============================================================================

pub struct AppState<S> {
    pub table: TableDefinition,
    pub source: S,
    pub namespace: String,
}

impl<S: DataSource> AppState<S> {
    pub fn new(table: TableDefinition, source: S, namespace: impl Into<String>) -> Self {
        AppState {
            table,
            source,
            namespace: namespace.into(),
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Builds the API router over `state`.
pub fn router<S: DataSource>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/{*path}", get(dispatch::<S>))
        .with_state(Arc::new(state))
}

impl TableDefinition {
    /// Serves this table from `source` under `/api/<namespace>/fetch`.
    pub fn handler<S: DataSource>(self, source: S, namespace: impl Into<String>) -> Router {
        router(AppState::new(self, source, namespace))
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn dispatch<S: DataSource>(
    State(state): State<Arc<AppState<S>>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    log_enter!("API", "dispatch", "path={}", path);

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 || segments[0] != state.namespace {
        log_debug!("API", "no route for /api/{}", path);
        return Err(ApiError::NotFound);
    }

    match segments[1] {
        "fetch" => fetch(&state, query.as_deref()).await,
        other => {
            log_debug!("API", "unknown action '{}'", other);
            Err(ApiError::NotFound)
        }
    }
}

async fn fetch<S: DataSource>(state: &AppState<S>, query: Option<&str>) -> Result<Response, ApiError> {
    let rows = state.source.load().await?;

    let mut fields = parse_fields(query);
    if fields.is_empty() {
        fields = state.table.properties();
    }

    let values = project(&rows, &fields);
    log_debug!("API", "fetch {} rows x {} fields", values.len(), fields.len());

    Ok(Json(FetchResponse { values }).into_response())
}
