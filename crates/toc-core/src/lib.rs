//! `toc-core` is the core library of `toc-transformer`, turning a cell-site
//! inventory export into the artifacts a radio-planning tool imports.
//!
//! This crate includes:
//! - **Ingest**: Reads the `;`-separated export and keeps `TVFZ` and `mBS` stations.
//! - **Normalize**: Repairs coordinates whose decimal point arrives as an arbitrary marker.
//! - **Transform**: Sorts by site name, assigns ordinal ids and flags shared sites as directed.
//! - **Emit**: Writes the period- and comma-decimal tables plus the ATD descriptor.
//!
//! The `operations` module ties the steps together for front ends.

pub mod emit;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod operations;
pub mod options;
pub mod transform;

pub use error::{ErrorKind, Result, TransformError};
pub use operations::{ConversionSummary, Transformer, convert};
pub use options::{ConvertOptions, LineEnding};
