//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the shared record model.
//! CONTEXT: Re-exports public types for use by the pivot engine and the server.

pub mod record;
pub mod value;

// Re-export commonly used types at the crate root
pub use record::{Dataset, Record};
pub use value::{Value, UNDEFINED};
