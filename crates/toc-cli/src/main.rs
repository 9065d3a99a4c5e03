//! Command-line interface for `toc-transformer`.
//!
//! This binary is the front end of the [`toc_core`] library: it reads a
//! cell-site inventory export and writes the BTS tables and ATD descriptor a
//! radio-planning tool imports.
//!
//! # Architecture
//!
//! The CLI is built using [`clap`] for argument parsing and [`tracing`] for structured logging.
//! It parses arguments, configures logging, and runs the blocking conversion on a
//! background task while reporting progress.
//!
//! # Available Commands
//!
//! - `convert` - Convert an inventory export into the BTS artifacts
//! - `schema` - List the output columns and their ATD types

mod display;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_log::LogTracer;
use tracing_subscriber::FmtSubscriber;

use toc_core::{ConversionSummary, ConvertOptions, LineEnding, TransformError, Transformer};

use crate::display::{display_summary, schema_table};

#[derive(Parser)]
#[command(
    name = "toc-transformer",
    version,
    about = "Converts cell-site inventory exports into BTS tables for radio planning",
    long_about = "Reads a ';'-separated site inventory export, keeps TVFZ and mBS stations and writes\n\
                  <input>.txt, <input>.txt.csv and the <input>.ATD schema descriptor."
)]
/// Command-line arguments and options for the `toc-transformer` CLI.
struct Cli {
    /// Enable verbose (INFO level) logging output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug (DEBUG level) logging output with detailed diagnostics.
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `toc-transformer` CLI.
#[derive(Subcommand)]
enum Commands {
    /// Converts an inventory export into the BTS tables and ATD descriptor.
    ///
    /// The outputs are written next to the input, replacing its extension.
    Convert {
        /// Path to the inventory export.
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Field delimiter of the export.
        #[arg(long, default_value = ";", value_parser = parse_byte)]
        delimiter: u8,

        /// Lines starting with this character are ignored.
        #[arg(long, default_value = "#", value_parser = parse_byte)]
        comment: u8,

        /// Treat every line as data, including those starting with the comment character.
        #[arg(long)]
        no_comment: bool,

        /// Station types to keep (`SITE_MANAGER.BS_TYPE`). Repeat for several.
        #[arg(long = "station-type", value_name = "TYPE", default_values = ["TVFZ", "mBS"])]
        station_types: Vec<String>,

        /// Characters read as the decimal point in coordinates. Repeat for several.
        #[arg(long = "decimal-marker", value_name = "CHAR", default_values = [".", ",", "*"])]
        decimal_markers: Vec<char>,

        /// Extension of the primary table.
        #[arg(long, default_value = "txt")]
        table_extension: String,

        /// Field delimiter of the primary table.
        #[arg(long, default_value = ";", value_parser = parse_byte)]
        table_delimiter: u8,

        /// Suffix appended to the primary table name for the comma-decimal table.
        #[arg(long, default_value = "csv")]
        secondary_suffix: String,

        /// Field delimiter of the comma-decimal table.
        #[arg(long, default_value = ";", value_parser = parse_byte)]
        secondary_delimiter: u8,

        /// Extension of the schema descriptor.
        #[arg(long, default_value = "ATD")]
        descriptor_extension: String,

        /// Terminate output lines with LF instead of CRLF.
        #[arg(long)]
        lf: bool,
    },

    /// Lists the output columns and their ATD types.
    Schema,
}

/// Parses a single ASCII character into a delimiter byte.
fn parse_byte(value: &str) -> std::result::Result<u8, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!("expected a single ASCII character, got '{value}'")),
    }
}

/// Entry point for the `toc-transformer` command-line interface.
///
/// # Errors
///
/// Returns an error if the logging system cannot be initialized. Conversion
/// failures are reported on stderr and turned into a failing exit code.
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity flags
    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // Bridge logs from the `log` crate to the `tracing` ecosystem.
    LogTracer::init()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true) // Show module paths for better context
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Convert {
            input,
            delimiter,
            comment,
            no_comment,
            station_types,
            decimal_markers,
            table_extension,
            table_delimiter,
            secondary_suffix,
            secondary_delimiter,
            descriptor_extension,
            lf,
        } => {
            info!("Converting {}", input.display());
            let options = ConvertOptions::new()
                .with_delimiter(delimiter)
                .with_comment((!no_comment).then_some(comment))
                .with_station_types(station_types)
                .with_decimal_markers(decimal_markers)
                .with_table_extension(table_extension)
                .with_table_delimiter(table_delimiter)
                .with_secondary_suffix(secondary_suffix)
                .with_secondary_delimiter(secondary_delimiter)
                .with_descriptor_extension(descriptor_extension)
                .with_line_ending(if lf { LineEnding::Lf } else { LineEnding::Crlf });
            Ok(handle_convert(input, options).await)
        },
        Commands::Schema => {
            handle_schema();
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// Runs the conversion off the main thread and reports its outcome.
async fn handle_convert(input: PathBuf, options: ConvertOptions) -> ExitCode {
    let result = tokio::task::spawn_blocking(move || run_conversion(&input, options))
        .await
        .unwrap_or_else(|e| {
            Err(TransformError::unknown(format!("conversion task failed: {e}")).with_source(e))
        });

    match result {
        Ok(summary) => {
            display_summary(&summary);
            println!("Successful.");
            ExitCode::SUCCESS
        },
        Err(err) => {
            error!("{err}");
            eprintln!("{}", err.user_message());
            if let Some(suggestion) = err.recovery_suggestion() {
                eprintln!("Hint: {suggestion}");
            }
            ExitCode::FAILURE
        },
    }
}

/// Reads, then writes the tables, then writes the descriptor.
fn run_conversion(input: &Path, options: ConvertOptions) -> toc_core::Result<ConversionSummary> {
    progress(1, "Reading CSV");
    let transformer = Transformer::read(input, options)?;

    progress(2, "Writing TXT and CSV");
    let mut summary = transformer.summary();
    summary.written = transformer.write_tables()?;

    progress(3, "Writing ATD");
    summary.written.extend(transformer.write_descriptor()?);
    Ok(summary)
}

fn progress(step: usize, label: &str) {
    eprintln!("[{step}/3] {label}");
}

/// Handles the `schema` subcommand by printing the output columns as a table.
fn handle_schema() {
    println!("\nOutput columns ({} total):\n", toc_core_common::column_count());
    println!("{}", schema_table());
}
