//! FILENAME: app/server/src/client.rs
//! Client for the fetch route.

use engine::Dataset;
use pivot_engine::{FieldRef, ValueDescriptor};

use crate::error::ClientError;
use crate::fetch::{fetch_fields, FetchPayload};

#[derive(Debug, Clone)]
pub struct RecordClient {
    http: reqwest::Client,
    base_url: String,
    namespace: String,
}

impl RecordClient {
    pub fn new(base_url: impl Into<String>, namespace: impl Into<String>) -> Self {
        RecordClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            namespace: namespace.into(),
        }
    }

    /// URL of the fetch for one pivot.
    pub fn fetch_url(&self, value: &ValueDescriptor, columns: Option<&FieldRef>, rows: Option<&FieldRef>) -> String {
        let fields = fetch_fields(value, columns, rows).join(",");
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("fields", &fields)
            .finish();
        format!("{}/api/{}/fetch?{}", self.base_url, self.namespace, query)
    }

    /// Fetches the records one pivot needs.
    pub async fn fetch(
        &self,
        value: &ValueDescriptor,
        columns: Option<&FieldRef>,
        rows: Option<&FieldRef>,
    ) -> Result<Dataset, ClientError> {
        let url = self.fetch_url(value, columns, rows);
        crate::log_debug!("CLIENT", "GET {}", url);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let payload: FetchPayload = response.json().await?;
        crate::log_debug!("CLIENT", "received {} records", payload.values.len());
        Ok(Dataset::loaded(payload.values))
    }
}
