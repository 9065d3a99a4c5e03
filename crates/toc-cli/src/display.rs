//! Display utilities for formatting CLI output.

use tabled::{Table, Tabled};

use toc_core::ConversionSummary;
use toc_core_common::COLUMN_SCHEMA;

/// Table row representation for displaying the output column schema.
#[derive(Tabled)]
pub struct ColumnRow {
    /// Zero-based position, as used in the ATD `Columns{i}_*` keys.
    #[tabled(rename = "#")]
    pub index: usize,
    /// Column header name.
    #[tabled(rename = "Column")]
    pub name: String,
    /// ATD type tag.
    #[tabled(rename = "Type")]
    pub atd_type: String,
}

/// Table row representation for the conversion counters.
#[derive(Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Rows")]
    pub label: &'static str,
    #[tabled(rename = "Count")]
    pub count: usize,
}

/// Renders the column schema in emission order.
#[must_use]
pub fn schema_table() -> String {
    let rows: Vec<ColumnRow> = COLUMN_SCHEMA
        .iter()
        .enumerate()
        .map(|(index, column)| ColumnRow {
            index,
            name: column.name.to_string(),
            atd_type: column.atd_type.as_str().to_string(),
        })
        .collect();
    Table::new(rows).to_string()
}

/// Display a conversion summary.
pub fn display_summary(summary: &ConversionSummary) {
    let rows = vec![
        SummaryRow {
            label: "Emitted",
            count: summary.emitted_rows,
        },
        SummaryRow {
            label: "Filtered",
            count: summary.filtered_rows,
        },
        SummaryRow {
            label: "Malformed",
            count: summary.malformed_rows,
        },
    ];
    println!("{}", Table::new(rows));

    if summary.written.is_empty() {
        println!("No matching stations, nothing written.");
    }
    for path in &summary.written {
        println!("Wrote {}", path.display());
    }
}
