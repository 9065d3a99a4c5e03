//! Conversion options
//!
//! Options follow the builder pattern: start from [`ConvertOptions::default`]
//! and override single settings with the `with_*` methods.

use std::path::{Path, PathBuf};

/// Station types kept by the row filter.
pub const DEFAULT_STATION_TYPES: [&str; 2] = ["TVFZ", "mBS"];

/// Characters accepted as the decimal marker in coordinate text.
pub const DEFAULT_DECIMAL_MARKERS: [char; 3] = ['.', ',', '*'];

/// Line terminator of the written artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\r\n`, as expected by the Windows planning tool
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    /// The terminator text.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Options for reading the inventory export and writing the BTS artifacts
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Input column delimiter (default: b';')
    pub delimiter: u8,
    /// Lines starting with this byte are skipped (default: b'#')
    pub comment: Option<u8>,
    /// Values of `SITE_MANAGER.BS_TYPE` that survive the filter
    pub station_types: Vec<String>,
    /// Characters treated as the decimal marker during normalization
    pub decimal_markers: Vec<char>,
    /// Extension of the primary table (default: "txt")
    pub table_extension: String,
    /// Delimiter of the primary table (default: b';')
    pub table_delimiter: u8,
    /// Suffix appended to the primary table name for the secondary table (default: "csv")
    pub secondary_suffix: String,
    /// Delimiter of the secondary table (default: b';')
    pub secondary_delimiter: u8,
    /// Extension of the schema descriptor (default: "ATD")
    pub descriptor_extension: String,
    /// Line terminator of all written files (default: CRLF)
    pub line_ending: LineEnding,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            comment: Some(b'#'),
            station_types: DEFAULT_STATION_TYPES.iter().map(ToString::to_string).collect(),
            decimal_markers: DEFAULT_DECIMAL_MARKERS.to_vec(),
            table_extension: "txt".to_string(),
            table_delimiter: b';',
            secondary_suffix: "csv".to_string(),
            secondary_delimiter: b';',
            descriptor_extension: "ATD".to_string(),
            line_ending: LineEnding::Crlf,
        }
    }
}

impl ConvertOptions {
    /// Create new options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the comment marker, `None` disables comment lines
    #[must_use]
    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    /// Set the accepted station types
    #[must_use]
    pub fn with_station_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.station_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the decimal markers
    #[must_use]
    pub fn with_decimal_markers(mut self, markers: impl Into<Vec<char>>) -> Self {
        self.decimal_markers = markers.into();
        self
    }

    /// Set the primary table extension
    #[must_use]
    pub fn with_table_extension(mut self, ext: impl Into<String>) -> Self {
        self.table_extension = ext.into();
        self
    }

    /// Set the primary table delimiter
    #[must_use]
    pub fn with_table_delimiter(mut self, delimiter: u8) -> Self {
        self.table_delimiter = delimiter;
        self
    }

    /// Set the secondary table suffix
    #[must_use]
    pub fn with_secondary_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.secondary_suffix = suffix.into();
        self
    }

    /// Set the secondary table delimiter
    #[must_use]
    pub fn with_secondary_delimiter(mut self, delimiter: u8) -> Self {
        self.secondary_delimiter = delimiter;
        self
    }

    /// Set the schema descriptor extension
    #[must_use]
    pub fn with_descriptor_extension(mut self, ext: impl Into<String>) -> Self {
        self.descriptor_extension = ext.into();
        self
    }

    /// Set the line terminator
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Returns `true` if rows of this station type are kept.
    #[must_use]
    pub fn accepts_station_type(&self, bs_type: &str) -> bool {
        self.station_types.iter().any(|t| t == bs_type)
    }

    /// Path of the primary table for the given input.
    #[must_use]
    pub fn table_path(&self, input: &Path) -> PathBuf {
        input.with_extension(trim_dot(&self.table_extension))
    }

    /// Path of the secondary table for the given input.
    #[must_use]
    pub fn secondary_path(&self, input: &Path) -> PathBuf {
        let mut path = self.table_path(input).into_os_string();
        path.push(".");
        path.push(trim_dot(&self.secondary_suffix));
        PathBuf::from(path)
    }

    /// Path of the schema descriptor for the given input.
    #[must_use]
    pub fn descriptor_path(&self, input: &Path) -> PathBuf {
        input.with_extension(trim_dot(&self.descriptor_extension))
    }
}

fn trim_dot(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}
