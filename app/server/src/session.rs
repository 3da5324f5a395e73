//! FILENAME: app/server/src/session.rs
//! PURPOSE: One pivot bound to a data source.
//! CONTEXT: Holds the pivot description and the dataset fetched for it. The
//! dataset stays `Pending` until the first successful fetch; a failed fetch
//! leaves the previous state untouched.

use std::sync::Arc;

use engine::Dataset;
use pivot_engine::{FieldRef, PivotCache, PivotError, PivotResult, PivotView, ValueDescriptor};

use crate::client::RecordClient;
use crate::error::ClientError;

pub struct PivotSession {
    value: ValueDescriptor,
    columns: Option<FieldRef>,
    rows: Option<FieldRef>,
    dataset: Dataset,
    cache: PivotCache,
}

impl PivotSession {
    pub fn new(value: ValueDescriptor, columns: Option<FieldRef>, rows: Option<FieldRef>) -> Self {
        PivotSession {
            value,
            columns,
            rows,
            dataset: Dataset::Pending,
            cache: PivotCache::default(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn cache(&self) -> &PivotCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut PivotCache {
        &mut self.cache
    }

    /// Replaces the dataset, e.g. with records obtained elsewhere.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
    }

    /// Fetches fresh records for this pivot.
    pub async fn refresh(&mut self, client: &RecordClient) -> Result<(), ClientError> {
        let dataset = client
            .fetch(&self.value, self.columns.as_ref(), self.rows.as_ref())
            .await
            .map_err(|e| {
                crate::log_warn!("SESSION", "fetch failed: {}", e);
                e
            })?;
        self.dataset = dataset;
        Ok(())
    }

    pub fn result(&mut self) -> Result<Arc<PivotResult>, PivotError> {
        self.cache
            .get_or_build(&self.dataset, &self.value, self.columns.as_ref(), self.rows.as_ref())
    }

    pub fn view(&mut self) -> Result<PivotView, PivotError> {
        let result = self.result()?;
        Ok(PivotView::from_result(&result, self.rows.as_ref()))
    }
}
