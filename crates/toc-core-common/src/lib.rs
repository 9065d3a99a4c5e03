//! Common types shared across `toc-transformer` crates.
//!
//! This crate holds the output table contract: the ordered column schema
//! consumed by the ATD descriptor and the record type emitted by the pipeline.
//! It is kept separate so the CLI can describe the table without pulling in
//! the ingest and emission machinery.

pub mod record;
pub mod schema;

// Re-export commonly used types
pub use record::{DecimalStyle, OutputRecord};
pub use schema::{AtdType, COLUMN_SCHEMA, ColumnSpec, column_count, column_names};
