//! Error type for site inventory conversions.
//!
//! Every failure is a single [`TransformError`] discriminated by an
//! [`ErrorKind`]. The front end only needs the kind to pick its message; the
//! message, line and source carry the detail for logs.

use std::fmt::{self, Write};
use std::path::Path;

use thiserror::Error;

/// Broad category of a conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be opened, read, or its header is unusable.
    Reading,
    /// A field is missing, malformed, or failed to parse during transform or emission.
    Column,
    /// Anything else.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Reading => "reading error",
            ErrorKind::Column => "column error",
            ErrorKind::Unknown => "unknown error",
        };
        f.write_str(label)
    }
}

/// Main error type for conversions.
#[derive(Debug, Error)]
#[error("{kind}: {message}{}", line.map(|l| format!(" (line {l})")).unwrap_or_default())]
pub struct TransformError {
    kind: ErrorKind,
    message: String,
    line: Option<u64>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Type alias for Results using `TransformError`.
pub type Result<T> = std::result::Result<T, TransformError>;

impl TransformError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            source: None,
        }
    }

    /// Creates a [`ErrorKind::Reading`] error.
    #[must_use]
    pub fn reading(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Reading, message)
    }

    /// Creates a [`ErrorKind::Column`] error.
    #[must_use]
    pub fn column(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Column, message)
    }

    /// Creates a [`ErrorKind::Unknown`] error.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Attaches the input line the error was found on.
    #[must_use]
    pub fn at_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Get a user-friendly error message.
    ///
    /// Reading and column errors map to fixed texts; unknown errors carry the
    /// full diagnostic chain since there is nothing better to show.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Reading => "Error reading the CSV file.".to_string(),
            ErrorKind::Column => "Error: columns not recognized.".to_string(),
            ErrorKind::Unknown => {
                let mut text = format!("Unknown error.\n\n{}", self.message);
                let mut cause = std::error::Error::source(self);
                while let Some(err) = cause {
                    let _ = write!(text, "\n  caused by: {err}");
                    cause = err.source();
                }
                text
            },
        }
    }

    /// Get recovery suggestions if available.
    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<String> {
        match self.kind {
            ErrorKind::Reading => Some(
                "Check that the file exists, is ';'-separated and has a header row.".to_string(),
            ),
            ErrorKind::Column => Some(
                "Check the SITE, CELL and ANTENNA_SYSTEM columns for malformed numbers."
                    .to_string(),
            ),
            ErrorKind::Unknown => None,
        }
    }
}

/// Extension trait for tagging foreign errors with a kind and context.
pub trait ErrorContext<T> {
    /// Wraps the error as a [`ErrorKind::Reading`] error mentioning `path`.
    ///
    /// # Errors
    ///
    /// Returns a reading error if the underlying operation fails.
    fn reading_context(self, path: &Path) -> Result<T>;

    /// Wraps the error as a [`ErrorKind::Column`] error with `message`.
    ///
    /// # Errors
    ///
    /// Returns a column error if the underlying operation fails.
    fn column_context(self, message: impl FnOnce() -> String) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn reading_context(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            TransformError::reading(format!("failed to read '{}': {e}", path.display()))
                .with_source(e)
        })
    }

    fn column_context(self, message: impl FnOnce() -> String) -> Result<T> {
        self.map_err(|e| TransformError::column(format!("{}: {e}", message())).with_source(e))
    }
}
