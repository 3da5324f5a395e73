//! FILENAME: app/server/src/lib.rs
//! Record-serving API and pivot client.
//!
//! The server exposes table rows at `GET /api/<namespace>/fetch?fields=...`;
//! the client fetches the fields one pivot needs and hands them to
//! `pivot_engine` as a `Dataset`.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod routes;
pub mod session;
pub mod source;
pub mod table;

pub use client::RecordClient;
pub use config::ServerConfig;
pub use error::{ApiError, ClientError, SourceError};
pub use fetch::{fetch_fields, parse_fields, project, FetchPayload, FetchResponse, SourceRow};
pub use routes::{router, AppState};
pub use session::PivotSession;
pub use source::{DataSource, JsonFileSource, MemorySource};
pub use table::{define_table, TableDefinition};
