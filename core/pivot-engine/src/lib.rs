//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot matrix engine.
//!
//! Cross-tabulates a record sequence by up to two grouping dimensions into
//! a scalar, a vector or a grid of aggregated values. Depends on `engine`
//! only for shared types (Value, Record, Dataset).
//!
//! Layers:
//! - `definition`: Field and value descriptors (what the pivot IS)
//! - `headers`: Distinct values per dimension
//! - `aggregation`: Registry of aggregation kinds (HOW a cell is computed)
//! - `engine`: Shape selection and cell filling (HOW we calculate)
//! - `cache`: Memoization of the last build
//! - `view`: Renderable layout for the frontend (WHAT we display)

pub mod aggregation;
pub mod cache;
pub mod definition;
pub mod engine;
pub mod error;
pub mod headers;
pub mod view;

pub use crate::aggregation::{Aggregation, AggregationRegistry, CellPredicate, Count, FieldMatch};
pub use crate::cache::PivotCache;
pub use crate::definition::*;
pub use crate::engine::{aggregate, build_pivot, Matrix, PivotBuilder, PivotResult};
pub use crate::error::PivotError;
pub use crate::headers::{distinct_values, extract_headers, HeaderSet};
pub use crate::view::*;
