//! Canonical pipe-delimited rendering of an [`Extraction`].

use std::fmt;

use crate::types::{CustomerHeader, Extraction, TransactionRecord};

/// Column header shared with the downstream importer. Must stay verbatim.
pub const HEADER_LINE: &str =
    "Trans. Date|Value Date|Reference|Debits|Credits|Balance|Originating Branch|Remarks";

pub const CUSTOMER_NAME_LABEL: &str = "Customer Name: ";
pub const STATEMENT_PERIOD_LABEL: &str = "Statement Period: ";

pub const COLUMN_COUNT: usize = 8;

// `|` is the column delimiter; free text must not add columns.
fn free_text(s: &str) -> String {
    s.trim().replace('|', "/")
}

/// One canonical row: always eight fields, absent amounts left empty.
pub fn render_row(record: &TransactionRecord) -> String {
    let fields: [String; COLUMN_COUNT] = [
        record.transaction_date.clone(),
        record.value_date.clone(),
        record.reference.clone(),
        record.debit_amount.clone().unwrap_or_default(),
        record.credit_amount.clone().unwrap_or_default(),
        record.balance.clone(),
        free_text(&record.branch),
        free_text(&record.remarks),
    ];
    fields.join("|")
}

/// Metadata block (if any), then the header line and one row per record.
/// The header line is only written when there is at least one record.
pub fn render_canonical(header: Option<&CustomerHeader>, records: &[TransactionRecord]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(records.len() + 4);

    if let Some(h) = header {
        lines.push(format!("{CUSTOMER_NAME_LABEL}{}", h.name));
        lines.push(format!("{STATEMENT_PERIOD_LABEL}{}", h.period));
        lines.push(String::new());
    }

    if !records.is_empty() {
        lines.push(HEADER_LINE.to_string());
        lines.extend(records.iter().map(render_row));
    }

    lines.join("\n")
}

impl Extraction {
    /// Canonical text for structured results; the normalized input otherwise.
    pub fn render(&self) -> String {
        match self {
            Extraction::Structured { header, records } => {
                render_canonical(header.as_ref(), records)
            }
            Extraction::Unrecognized { text, .. } => text.clone(),
        }
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TransactionRecord {
        TransactionRecord {
            transaction_date: "15-Jan-2024".to_string(),
            value_date: "16-Jan-2024".to_string(),
            reference: "'TRF0001".to_string(),
            debit_amount: None,
            credit_amount: Some("1,000.00".to_string()),
            balance: "121,500.00".to_string(),
            branch: " Lagos Branch ".to_string(),
            remarks: "TRANSFER a|b".to_string(),
        }
    }

    #[test]
    fn test_row_keeps_eight_columns() {
        let row = render_row(&record());
        assert_eq!(
            row,
            "15-Jan-2024|16-Jan-2024|'TRF0001||1,000.00|121,500.00|Lagos Branch|TRANSFER a/b"
        );
        assert_eq!(row.matches('|').count(), COLUMN_COUNT - 1);
    }

    #[test]
    fn test_metadata_block_precedes_table() {
        let header = CustomerHeader {
            name: "JOHN DOE".to_string(),
            period: "01-Jan-2024 to 31-Jan-2024".to_string(),
        };
        let out = render_canonical(Some(&header), &[record()]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Customer Name: JOHN DOE");
        assert_eq!(lines[1], "Statement Period: 01-Jan-2024 to 31-Jan-2024");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], HEADER_LINE);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_no_header_line_without_records() {
        assert_eq!(render_canonical(None, &[]), "");
    }

    #[test]
    fn test_unrecognized_renders_text() {
        let e = Extraction::Unrecognized {
            header: Some(CustomerHeader {
                name: "X".to_string(),
                period: "Y".to_string(),
            }),
            text: "Customer Statement X Statement Period Y".to_string(),
        };
        assert_eq!(e.render(), "Customer Statement X Statement Period Y");
        assert_eq!(e.to_string(), e.render());
    }
}
