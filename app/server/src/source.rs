//! FILENAME: app/server/src/source.rs
//! Data sources backing the fetch route.

use std::future::Future;
use std::path::PathBuf;

use crate::error::SourceError;
use crate::fetch::SourceRow;

/// Produces the full row set of a table on every call.
pub trait DataSource: Send + Sync + 'static {
    fn load(&self) -> impl Future<Output = Result<Vec<SourceRow>, SourceError>> + Send;
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<SourceRow>,
}

impl MemorySource {
    pub fn new(rows: Vec<SourceRow>) -> Self {
        MemorySource { rows }
    }
}

impl DataSource for MemorySource {
    fn load(&self) -> impl Future<Output = Result<Vec<SourceRow>, SourceError>> + Send {
        let rows = self.rows.clone();
        async move { Ok(rows) }
    }
}

/// Rows read from a JSON array file, re-read on every load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

impl DataSource for JsonFileSource {
    fn load(&self) -> impl Future<Output = Result<Vec<SourceRow>, SourceError>> + Send {
        let path = self.path.clone();
        async move {
            let bytes = tokio::fs::read(&path).await?;
            let rows: Vec<SourceRow> = serde_json::from_slice(&bytes)?;
            crate::log_debug!("SOURCE", "loaded {} rows from {}", rows.len(), path.display());
            Ok(rows)
        }
    }
}
