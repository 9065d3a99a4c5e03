//! Numeric text normalization for locale-mangled coordinates.
//!
//! The inventory export writes coordinates with an arbitrary marker character
//! at the decimal position and may repeat it as a grouping separator further
//! right, e.g. `52.123.456` or `52*123456`. The first marker is the decimal
//! point; every later marker is dropped.

use crate::error::{Result, TransformError};

/// Rewrites `raw` into period-decimal text without grouping.
///
/// Text without any marker is returned trimmed and unchanged.
///
/// # Examples
///
/// ```
/// use toc_core::normalize::canonical_decimal;
///
/// assert_eq!(canonical_decimal("52.123.456", &['.']), "52.123456");
/// assert_eq!(canonical_decimal("52*123456", &['.', '*']), "52.123456");
/// assert_eq!(canonical_decimal(" 13 ", &['.']), "13");
/// ```
#[must_use]
pub fn canonical_decimal(raw: &str, markers: &[char]) -> String {
    let text = raw.trim();
    let Some(index) = text.find(|c: char| markers.contains(&c)) else {
        return text.to_string();
    };

    let (integral, rest) = text.split_at(index);
    let mut output = String::with_capacity(text.len());
    output.push_str(integral);
    output.push('.');
    output.extend(rest.chars().skip(1).filter(|c| !markers.contains(c)));
    output
}

/// Parses coordinate text into a finite decimal.
///
/// # Errors
///
/// Returns a column error if the text is empty, not a number after
/// normalization, or not finite.
pub fn parse_decimal(raw: &str, markers: &[char]) -> Result<f64> {
    let text = canonical_decimal(raw, markers);
    let value: f64 = text.parse().map_err(|e| {
        TransformError::column(format!("'{raw}' is not a decimal number")).with_source(e)
    })?;

    if !value.is_finite() {
        return Err(TransformError::column(format!(
            "'{raw}' is not a finite decimal number"
        )));
    }
    Ok(value)
}

/// Parses an optional decimal, falling back to `0` when absent or unparsable.
#[must_use]
pub fn parse_decimal_or_zero(raw: Option<&str>, markers: &[char]) -> f64 {
    match raw.map(str::trim) {
        None | Some("") => 0.0,
        Some(text) => parse_decimal(text, markers).unwrap_or_else(|e| {
            log::debug!("Defaulting to 0: {e}");
            0.0
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::options::DEFAULT_DECIMAL_MARKERS;

    const MARKERS: &[char] = &DEFAULT_DECIMAL_MARKERS;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_marker_at_decimal_position() {
        assert_close(parse_decimal("52*123456", MARKERS).unwrap(), 52.123456);
    }

    #[test]
    fn test_plain_period_decimal() {
        assert_close(parse_decimal("52.123456", MARKERS).unwrap(), 52.123456);
    }

    #[test]
    fn test_grouping_markers_are_removed() {
        assert_close(parse_decimal("52.123.456", MARKERS).unwrap(), 52.123456);
        assert_close(parse_decimal("13.404.954", MARKERS).unwrap(), 13.404954);
    }

    #[test]
    fn test_comma_decimal() {
        assert_close(parse_decimal("8,6821", MARKERS).unwrap(), 8.6821);
    }

    #[test]
    fn test_negative_value() {
        assert_close(parse_decimal("-3.703.790", MARKERS).unwrap(), -3.70379);
    }

    #[test]
    fn test_no_marker_parses_directly() {
        assert_close(parse_decimal("52", MARKERS).unwrap(), 52.0);
        assert_eq!(canonical_decimal("52", MARKERS), "52");
    }

    #[test]
    fn test_only_configured_markers_count() {
        assert_eq!(canonical_decimal("52*1", &['.']), "52*1");
        assert!(parse_decimal("52*1", &['.']).is_err());
    }

    #[test]
    fn test_invalid_text_is_column_error() {
        let err = parse_decimal("abc", MARKERS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Column);

        assert!(parse_decimal("", MARKERS).is_err());
        assert!(parse_decimal("NaN", MARKERS).is_err());
        assert!(parse_decimal("inf", MARKERS).is_err());
    }

    #[test]
    fn test_parse_decimal_or_zero() {
        assert_close(parse_decimal_or_zero(Some("43.5"), MARKERS), 43.5);
        assert_close(parse_decimal_or_zero(Some(""), MARKERS), 0.0);
        assert_close(parse_decimal_or_zero(Some("n/a"), MARKERS), 0.0);
        assert_close(parse_decimal_or_zero(None, MARKERS), 0.0);
    }
}
