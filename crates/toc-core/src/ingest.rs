//! Ingestion of the delimited site inventory export.
//!
//! The export has a fixed column contract and a fixed delimiter with no
//! quoting or escaping, so the reader is configured to treat every delimiter
//! as a field boundary. Lines with the wrong field count are skipped with a
//! warning; rows whose station type is not accepted are dropped before any
//! field is parsed.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use toc_core_common::OutputRecord;

use crate::error::{ErrorContext, Result, TransformError};
use crate::normalize::{parse_decimal, parse_decimal_or_zero};
use crate::options::ConvertOptions;

/// Input field names of the inventory export.
pub mod fields {
    pub const SITE_NAME: &str = "SITE.NAME";
    pub const SITE_LONGITUDE: &str = "SITE.LONGITUDE";
    pub const SITE_LATITUDE: &str = "SITE.LATITUDE";
    pub const FS_POWER_DBM: &str = "ZONE.FS_POWER_DBM";
    pub const DIRECTION_DEG: &str = "ANTENNA_SYSTEM.DIRECTION_DEG";
    pub const ANTENNA_NAME: &str = "ANTENNA_SYSTEM.NAME";
    pub const G_BCCH: &str = "CELL.G_BCCH";
    pub const LAC: &str = "CELL.LAC";
    pub const NE_ID: &str = "CELL.NE_ID";
    pub const BS_TYPE: &str = "SITE_MANAGER.BS_TYPE";

    /// Fields that must be present in the header. `ZONE.FS_POWER_DBM` is
    /// optional and defaults to 0.
    pub const REQUIRED: [&str; 9] = [
        SITE_NAME,
        SITE_LONGITUDE,
        SITE_LATITUDE,
        DIRECTION_DEG,
        ANTENNA_NAME,
        G_BCCH,
        LAC,
        NE_ID,
        BS_TYPE,
    ];
}

/// Result of reading an export.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Records built from rows that passed the station filter, in input order.
    pub records: Vec<OutputRecord>,
    /// Lines skipped because they could not be split into the header's fields.
    pub malformed_rows: usize,
    /// Well-formed rows dropped by the station filter.
    pub filtered_rows: usize,
}

/// Column positions by header name.
#[derive(Debug)]
struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        if headers.iter().all(str::is_empty) {
            return Err(TransformError::reading("input has no header row"));
        }

        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();

        let missing: Vec<&str> = fields::REQUIRED
            .iter()
            .copied()
            .filter(|name| !positions.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(TransformError::reading(format!(
                "header is missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { positions })
    }
}

/// A parsed line viewed as a field-name to raw-text mapping.
struct InputRow<'a> {
    header: &'a HeaderIndex,
    record: &'a StringRecord,
    line: u64,
}

impl<'a> InputRow<'a> {
    fn get(&self, field: &str) -> Option<&'a str> {
        self.header
            .positions
            .get(field)
            .and_then(|&i| self.record.get(i))
    }

    fn text(&self, field: &str) -> Result<&'a str> {
        self.get(field).ok_or_else(|| {
            TransformError::column(format!("field '{field}' is missing")).at_line(self.line)
        })
    }

    fn int(&self, field: &str) -> Result<i32> {
        let raw = self.text(field)?;
        raw.trim()
            .parse::<i32>()
            .column_context(|| format!("field '{field}' value '{raw}' is not an integer"))
            .map_err(|e| e.at_line(self.line))
    }

    fn decimal(&self, field: &str, markers: &[char]) -> Result<f64> {
        let raw = self.text(field)?;
        parse_decimal(raw, markers).map_err(|e| e.at_line(self.line))
    }

    fn to_record(&self, options: &ConvertOptions) -> Result<OutputRecord> {
        let markers = &options.decimal_markers;
        let mut record = OutputRecord {
            name: self.text(fields::SITE_NAME)?.to_string(),
            pos_longitude: self.decimal(fields::SITE_LONGITUDE, markers)?,
            pos_latitude: self.decimal(fields::SITE_LATITUDE, markers)?,
            power: parse_decimal_or_zero(self.get(fields::FS_POWER_DBM), markers),
            cell_ne_id: self.text(fields::NE_ID)?.to_string(),
            site_bs_type: self.text(fields::BS_TYPE)?.to_string(),
            antenna_system: self.text(fields::ANTENNA_NAME)?.to_string(),
            ..OutputRecord::default()
        };
        record.set_direction(self.int(fields::DIRECTION_DEG)?);
        let bcch = self.int(fields::G_BCCH)?;
        if record.set_bcch(bcch).is_none() {
            return Err(TransformError::column(format!(
                "field '{}' value {bcch} is out of the channel range",
                fields::G_BCCH
            ))
            .at_line(self.line));
        }
        record.set_lac(self.int(fields::LAC)?);
        Ok(record)
    }
}

/// Reads the export at `path` into filtered output records.
///
/// # Errors
///
/// Returns a reading error if the file cannot be opened or read or its header
/// lacks a required field, and a column error if a surviving row holds a
/// malformed number.
pub fn ingest(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<Ingested> {
    let path = path.as_ref();
    info!("Reading site inventory: {}", path.display());
    let file = File::open(path).reading_context(path)?;
    ingest_reader(file, options)
}

/// Reads an export from any reader. See [`ingest`].
///
/// # Errors
///
/// Same as [`ingest`].
pub fn ingest_reader<R: Read>(reader: R, options: &ConvertOptions) -> Result<Ingested> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .comment(options.comment)
        .quoting(false)
        .escape(None)
        .flexible(false)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| TransformError::reading(format!("unreadable header: {e}")).with_source(e))?
        .clone();
    let header = HeaderIndex::from_headers(&headers)?;
    debug!("Header has {} fields", headers.len());

    let mut ingested = Ingested::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(TransformError::reading(format!("read failed: {e}")).with_source(e));
            },
            Err(e) => {
                warn!("Skipping malformed line: {e}");
                ingested.malformed_rows += 1;
                continue;
            },
        };

        let row = InputRow {
            header: &header,
            record: &record,
            line: record.position().map_or(0, csv::Position::line),
        };

        let bs_type = row.text(fields::BS_TYPE)?;
        if !options.accepts_station_type(bs_type) {
            debug!("Filtered line {} with station type '{bs_type}'", row.line);
            ingested.filtered_rows += 1;
            continue;
        }

        ingested.records.push(row.to_record(options)?);
    }

    info!(
        "Read {} site rows ({} filtered, {} malformed)",
        ingested.records.len(),
        ingested.filtered_rows,
        ingested.malformed_rows
    );
    Ok(ingested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const HEADER: &str = "SITE.NAME;SITE.LONGITUDE;SITE.LATITUDE;ZONE.FS_POWER_DBM;\
                          ANTENNA_SYSTEM.DIRECTION_DEG;ANTENNA_SYSTEM.NAME;CELL.G_BCCH;\
                          CELL.LAC;CELL.NE_ID;SITE_MANAGER.BS_TYPE";

    fn read(body: &str) -> Result<Ingested> {
        let text = format!("{HEADER}\n{body}");
        ingest_reader(text.as_bytes(), &ConvertOptions::default())
    }

    #[test]
    fn test_reads_surviving_row() {
        let ingested = read("SiteA;13.404.954;52*520008;43.5;120;ANT-1;10;4660;NE-1;mBS\n").unwrap();
        assert_eq!(ingested.records.len(), 1);

        let record = &ingested.records[0];
        assert_eq!(record.name, "SiteA");
        assert!((record.pos_longitude - 13.404954).abs() < 1e-9);
        assert!((record.pos_latitude - 52.520008).abs() < 1e-9);
        assert!((record.power - 43.5).abs() < 1e-9);
        assert_eq!(record.direction, 120);
        assert_eq!(record.is_directed, 1);
        assert_eq!(record.channel, 3609);
        assert_eq!(record.lac, 4660);
        assert_eq!(record.lac_hex, "1234");
        assert_eq!(record.cell_ne_id, "NE-1");
        assert_eq!(record.site_bs_type, "mBS");
        assert_eq!(record.antenna_system, "ANT-1");
        assert_eq!(record.unique_id, 0);
    }

    #[test]
    fn test_filters_station_types() {
        let ingested = read(
            "A;1.0;2.0;0;0;X;1;1;N;TVFZ\n\
             B;1.0;2.0;0;0;X;1;1;N;other\n\
             C;1.0;2.0;0;0;X;1;1;N;mBS\n\
             D;1.0;2.0;0;0;X;1;1;N;MBS\n",
        )
        .unwrap();
        let names: Vec<_> = ingested.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(ingested.filtered_rows, 2);
    }

    #[test]
    fn test_filtered_rows_are_not_parsed() {
        let ingested = read("B;garbage;garbage;0;x;X;y;z;N;other\n").unwrap();
        assert!(ingested.records.is_empty());
        assert_eq!(ingested.filtered_rows, 1);
    }

    #[test]
    fn test_skips_malformed_and_comment_lines() {
        let ingested = read(
            "# exported by inventory\n\
             A;1.0;2.0;0;0;X;1;1;N;mBS\n\
             broken;line\n\
             B;1.0;2.0;0;0;X;1;1;N;mBS\n",
        )
        .unwrap();
        assert_eq!(ingested.records.len(), 2);
        assert_eq!(ingested.malformed_rows, 1);
    }

    #[test]
    fn test_power_defaults_to_zero() {
        let ingested = read("A;1.0;2.0;;0;X;1;1;N;mBS\nB;1.0;2.0;n/a;0;X;1;1;N;mBS\n").unwrap();
        assert!(ingested.records.iter().all(|r| r.power == 0.0));
    }

    #[test]
    fn test_power_column_is_optional() {
        let text = "SITE.NAME;SITE.LONGITUDE;SITE.LATITUDE;ANTENNA_SYSTEM.DIRECTION_DEG;\
                    ANTENNA_SYSTEM.NAME;CELL.G_BCCH;CELL.LAC;CELL.NE_ID;SITE_MANAGER.BS_TYPE\n\
                    A;1.0;2.0;90;X;1;1;N;TVFZ\n";
        let ingested = ingest_reader(text.as_bytes(), &ConvertOptions::default()).unwrap();
        assert_eq!(ingested.records[0].power, 0.0);
        assert_eq!(ingested.records[0].direction, 90);
    }

    #[test]
    fn test_bad_integer_is_column_error() {
        let err = read("A;1.0;2.0;0;north;X;1;1;N;mBS\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Column);
        assert!(err.message().contains("ANTENNA_SYSTEM.DIRECTION_DEG"));
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_channel_overflow_is_column_error() {
        let err = read("A;1.0;2.0;0;0;X;2147483647;1;N;mBS\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Column);
        assert!(err.message().contains("CELL.G_BCCH"));
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_bad_coordinate_is_column_error() {
        let err = read("A;east;2.0;0;0;X;1;1;N;mBS\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Column);
    }

    #[test]
    fn test_missing_header_field_is_reading_error() {
        let text = "SITE.NAME;SITE.LONGITUDE\nA;1.0\n";
        let err = ingest_reader(text.as_bytes(), &ConvertOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reading);
        assert!(err.message().contains("CELL.LAC"));
    }

    #[test]
    fn test_empty_input_is_reading_error() {
        let err = ingest_reader(&b""[..], &ConvertOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reading);
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let ingested = read("").unwrap();
        assert!(ingested.records.is_empty());
    }

    #[test]
    fn test_missing_file_is_reading_error() {
        let err = ingest("/nonexistent/dir/export.csv", &ConvertOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reading);
    }
}
