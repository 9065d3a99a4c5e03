//! Conversion of a site inventory export into the BTS artifacts.
//!
//! [`Transformer`] exposes the three steps a front end drives one after the
//! other, and [`convert`] runs them all at once.

use std::path::{Path, PathBuf};

use log::info;
use toc_core_common::OutputRecord;

use crate::emit::{emit_descriptor, emit_tables};
use crate::error::Result;
use crate::ingest::ingest;
use crate::options::ConvertOptions;
use crate::transform::transform;

/// Outcome of a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Rows kept after filtering and written to each table.
    pub emitted_rows: usize,
    /// Rows dropped by the station filter.
    pub filtered_rows: usize,
    /// Lines skipped because they were malformed.
    pub malformed_rows: usize,
    /// Paths written, in writing order.
    pub written: Vec<PathBuf>,
}

/// A read export ready to be written.
#[derive(Debug)]
pub struct Transformer {
    input: PathBuf,
    options: ConvertOptions,
    records: Vec<OutputRecord>,
    filtered_rows: usize,
    malformed_rows: usize,
}

impl Transformer {
    /// Reads and transforms the export at `input`.
    ///
    /// # Errors
    ///
    /// Returns a reading error if the export cannot be read and a column error
    /// if a surviving row holds a malformed value.
    pub fn read(input: impl AsRef<Path>, options: ConvertOptions) -> Result<Self> {
        let input = input.as_ref().to_path_buf();
        let ingested = ingest(&input, &options)?;
        let records = transform(ingested.records);
        Ok(Self {
            input,
            options,
            records,
            filtered_rows: ingested.filtered_rows,
            malformed_rows: ingested.malformed_rows,
        })
    }

    /// Sorted records with ids assigned.
    #[must_use]
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Writes the period-decimal and comma-decimal tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a table cannot be written.
    pub fn write_tables(&self) -> Result<Vec<PathBuf>> {
        emit_tables(&self.records, &self.input, &self.options)
    }

    /// Writes the ATD descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be written.
    pub fn write_descriptor(&self) -> Result<Option<PathBuf>> {
        emit_descriptor(&self.records, &self.input, &self.options)
    }

    /// Summary of what was read, with `written` left empty.
    #[must_use]
    pub fn summary(&self) -> ConversionSummary {
        ConversionSummary {
            emitted_rows: self.records.len(),
            filtered_rows: self.filtered_rows,
            malformed_rows: self.malformed_rows,
            written: Vec::new(),
        }
    }
}

/// Reads `input` and writes both tables and the descriptor next to it.
///
/// # Errors
///
/// Returns the first error of any step; later steps are not run.
pub fn convert(input: impl AsRef<Path>, options: ConvertOptions) -> Result<ConversionSummary> {
    let transformer = Transformer::read(input, options)?;

    let mut summary = transformer.summary();
    summary.written = transformer.write_tables()?;
    summary.written.extend(transformer.write_descriptor()?);

    info!(
        "Converted {} into {} files",
        transformer.input().display(),
        summary.written.len()
    );
    Ok(summary)
}
