//! Static column schema for the BTS output table.
//!
//! The schema is an ordered list of `(name, type)` pairs. Its order is the
//! emission order of both delimited tables and the `Columns{i}_*` order of the
//! ATD descriptor, so it is deliberately a slice and not a keyed map.
//!
//! # Examples
//!
//! ```
//! use toc_core_common::schema::{AtdType, COLUMN_SCHEMA, column_count};
//!
//! assert_eq!(column_count(), 20);
//! assert_eq!(COLUMN_SCHEMA[0].name, "Name");
//! assert_eq!(COLUMN_SCHEMA[0].atd_type, AtdType::DynChar);
//! ```

/// Column type tags understood by the radio-planning tool's ATD reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtdType {
    /// Variable length text.
    DynChar,
    /// Double precision decimal.
    Double,
    /// Tiny unsigned integer, used for flags.
    TinyInt,
    /// Short unsigned integer.
    ShortInt,
    /// Long unsigned integer.
    LongInt,
}

impl AtdType {
    /// Returns the tag written to the `Columns{i}_Type=` line.
    ///
    /// # Examples
    ///
    /// ```
    /// use toc_core_common::schema::AtdType;
    ///
    /// assert_eq!(AtdType::DynChar.as_str(), "utDynChar");
    /// assert_eq!(AtdType::LongInt.as_str(), "utULInt");
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AtdType::DynChar => "utDynChar",
            AtdType::Double => "utDouble",
            AtdType::TinyInt => "utUTInt",
            AtdType::ShortInt => "utUSInt",
            AtdType::LongInt => "utULInt",
        }
    }

    /// Returns `true` for decimal columns, whose text depends on the locale convention.
    #[must_use]
    pub fn is_decimal(&self) -> bool {
        matches!(self, AtdType::Double)
    }
}

/// A single column of the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header name, identical in the tables and the descriptor.
    pub name: &'static str,
    /// Descriptor type tag.
    pub atd_type: AtdType,
}

impl ColumnSpec {
    const fn new(name: &'static str, atd_type: AtdType) -> Self {
        Self { name, atd_type }
    }
}

/// The output table columns in emission order.
pub const COLUMN_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec::new("Name", AtdType::DynChar),
    ColumnSpec::new("PosLongitude", AtdType::Double),
    ColumnSpec::new("PosLatitude", AtdType::Double),
    ColumnSpec::new("PosErrorDirection", AtdType::Double),
    ColumnSpec::new("PosErrorLambda1", AtdType::Double),
    ColumnSpec::new("PosErrorLambda2", AtdType::Double),
    ColumnSpec::new("Power", AtdType::Double),
    ColumnSpec::new("IsDirected", AtdType::TinyInt),
    ColumnSpec::new("Direction", AtdType::ShortInt),
    ColumnSpec::new("UniqueId", AtdType::LongInt),
    ColumnSpec::new("BaseIndex", AtdType::ShortInt),
    ColumnSpec::new("Channel", AtdType::LongInt),
    ColumnSpec::new("FreqOff", AtdType::ShortInt),
    ColumnSpec::new("MNC", AtdType::ShortInt),
    ColumnSpec::new("MCC", AtdType::ShortInt),
    ColumnSpec::new("LAC", AtdType::ShortInt),
    ColumnSpec::new("LAC_Hex", AtdType::DynChar),
    ColumnSpec::new("CELL_NE_ID", AtdType::DynChar),
    ColumnSpec::new("SITE_BS_TYPE", AtdType::DynChar),
    ColumnSpec::new("ANTENNA_SYSTEM", AtdType::DynChar),
];

/// Number of columns in the output table.
#[must_use]
pub fn column_count() -> usize {
    COLUMN_SCHEMA.len()
}

/// Column names in emission order, suitable as a table header.
#[must_use]
pub fn column_names() -> Vec<&'static str> {
    COLUMN_SCHEMA.iter().map(|c| c.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_has_twenty_columns() {
        assert_eq!(column_count(), 20);
        assert_eq!(column_names().len(), 20);
    }

    #[test]
    fn test_column_names_are_unique() {
        let unique: HashSet<_> = column_names().into_iter().collect();
        assert_eq!(unique.len(), COLUMN_SCHEMA.len());
    }

    #[test]
    fn test_schema_order_is_fixed() {
        let names = column_names();
        assert_eq!(names.first(), Some(&"Name"));
        assert_eq!(names[9], "UniqueId");
        assert_eq!(names[16], "LAC_Hex");
        assert_eq!(names.last(), Some(&"ANTENNA_SYSTEM"));
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(AtdType::Double.as_str(), "utDouble");
        assert_eq!(AtdType::TinyInt.as_str(), "utUTInt");
        assert_eq!(AtdType::ShortInt.as_str(), "utUSInt");
        assert_eq!(COLUMN_SCHEMA[7].atd_type.as_str(), "utUTInt");
        assert_eq!(COLUMN_SCHEMA[11].atd_type.as_str(), "utULInt");
    }

    #[test]
    fn test_decimal_columns() {
        let decimals: Vec<_> = COLUMN_SCHEMA
            .iter()
            .filter(|c| c.atd_type.is_decimal())
            .map(|c| c.name)
            .collect();
        assert_eq!(
            decimals,
            vec![
                "PosLongitude",
                "PosLatitude",
                "PosErrorDirection",
                "PosErrorLambda1",
                "PosErrorLambda2",
                "Power"
            ]
        );
    }
}
