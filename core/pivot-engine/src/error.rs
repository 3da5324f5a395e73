//! FILENAME: core/pivot-engine/src/error.rs

use thiserror::Error;

use crate::definition::AggregationKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PivotError {
    #[error("Unknown aggregation kind: {0}")]
    UnknownAggregationKind(AggregationKind),
}
