//! Emission of the BTS tables and the ATD schema descriptor.
//!
//! Three files are derived from the input path:
//!
//! - `<base>.txt`, the primary table with period decimals,
//! - `<base>.txt.csv`, the same table with comma decimals,
//! - `<base>.ATD`, the descriptor naming the primary table and its columns.
//!
//! Every file is written to a temporary sibling and renamed over the
//! destination once complete, so a failed run never leaves a truncated
//! artifact. Nothing is written when there are no records.

use std::fs::{self, Permissions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use log::{debug, info};
use tempfile::NamedTempFile;
use toc_core_common::{COLUMN_SCHEMA, DecimalStyle, OutputRecord, column_names};

use crate::error::{ErrorContext, Result, TransformError};
use crate::options::{ConvertOptions, LineEnding};

/// Fixed descriptor preamble.
pub const ATD_HEAD: [&str; 4] = ["[Main]", "Type=ATD", "[Table1]", "Name=BTS_TABLE"];

/// Writes `records` as a delimited table with a schema-ordered header.
///
/// # Errors
///
/// Returns a column error if serialization or the underlying write fails.
pub fn write_table<W: Write>(
    writer: W,
    records: &[OutputRecord],
    delimiter: u8,
    style: DecimalStyle,
    line_ending: LineEnding,
) -> Result<()> {
    let terminator = match line_ending {
        LineEnding::Crlf => Terminator::CRLF,
        LineEnding::Lf => Terminator::Any(b'\n'),
    };
    let mut csv_writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(terminator)
        .from_writer(writer);

    csv_writer
        .write_record(column_names())
        .column_context(|| "failed to write table header".to_string())?;
    for record in records {
        csv_writer
            .write_record(record.to_row(style))
            .column_context(|| format!("failed to write row '{}'", record.name))?;
    }
    csv_writer
        .flush()
        .column_context(|| "failed to flush table".to_string())
}

/// Writes the ATD descriptor referencing `table_file_name`.
///
/// # Errors
///
/// Returns an unknown error if the underlying write fails.
pub fn write_descriptor<W: Write>(
    writer: W,
    table_file_name: &str,
    line_ending: LineEnding,
) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    write_descriptor_lines(&mut writer, table_file_name, line_ending.as_str())
        .and_then(|()| writer.flush())
        .map_err(|e| {
            TransformError::unknown(format!("failed to write descriptor: {e}")).with_source(e)
        })
}

fn write_descriptor_lines<W: Write>(
    writer: &mut W,
    table_file_name: &str,
    eol: &str,
) -> io::Result<()> {
    for line in ATD_HEAD {
        write!(writer, "{line}{eol}")?;
    }
    write!(writer, "File={table_file_name}{eol}")?;
    write!(writer, "Columns_Size={}{eol}", COLUMN_SCHEMA.len())?;
    for (i, column) in COLUMN_SCHEMA.iter().enumerate() {
        write!(writer, "Columns{i}_Name={}{eol}", column.name)?;
        write!(writer, "Columns{i}_Type={}{eol}", column.atd_type.as_str())?;
    }
    Ok(())
}

/// Permissions a freshly written artifact should carry: those of the file it
/// replaces, otherwise world-readable on unix.
fn output_permissions(path: &Path) -> Option<Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

/// Runs `write` against a temporary file next to `path` and renames it into place.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| {
        TransformError::unknown(format!("cannot create file in '{}': {e}", dir.display()))
            .with_source(e)
    })?;

    write(&mut file)?;

    if let Some(permissions) = output_permissions(path) {
        file.as_file().set_permissions(permissions).map_err(|e| {
            TransformError::unknown(format!(
                "cannot set permissions of '{}': {e}",
                path.display()
            ))
            .with_source(e)
        })?;
    }

    file.persist(path).map_err(|e| {
        TransformError::unknown(format!("cannot write '{}': {e}", path.display())).with_source(e)
    })?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Writes the primary and secondary tables for `input`.
///
/// Returns the written paths, empty when there are no records.
///
/// # Errors
///
/// Returns an error if either table cannot be written. Existing files are
/// left untouched in that case.
pub fn emit_tables(
    records: &[OutputRecord],
    input: &Path,
    options: &ConvertOptions,
) -> Result<Vec<PathBuf>> {
    if records.is_empty() {
        info!("No records to emit, skipping tables");
        return Ok(Vec::new());
    }

    let primary = options.table_path(input);
    let secondary = options.secondary_path(input);

    info!("Writing {} rows to {}", records.len(), primary.display());
    write_atomically(&primary, |file| {
        write_table(
            file,
            records,
            options.table_delimiter,
            DecimalStyle::Period,
            options.line_ending,
        )
    })?;

    info!("Writing {} rows to {}", records.len(), secondary.display());
    write_atomically(&secondary, |file| {
        write_table(
            file,
            records,
            options.secondary_delimiter,
            DecimalStyle::Comma,
            options.line_ending,
        )
    })?;

    Ok(vec![primary, secondary])
}

/// Writes the ATD descriptor for `input`.
///
/// Returns the written path, `None` when there are no records.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be written.
pub fn emit_descriptor(
    records: &[OutputRecord],
    input: &Path,
    options: &ConvertOptions,
) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        info!("No records to emit, skipping descriptor");
        return Ok(None);
    }

    let table = options.table_path(input);
    let table_file_name = table
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            TransformError::unknown(format!("'{}' has no file name", input.display()))
        })?;

    let path = options.descriptor_path(input);
    info!("Writing descriptor {}", path.display());
    write_atomically(&path, |file| {
        write_descriptor(file, &table_file_name, options.line_ending)
    })?;
    Ok(Some(path))
}
