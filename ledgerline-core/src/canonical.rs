//! Read canonical ledger text back into an [`Extraction`].
//!
//! This is the importer's side of the row contract: an optional
//! `Customer Name:` / `Statement Period:` block, the verbatim header line, then
//! pipe-delimited rows with exactly eight fields.

use anyhow::{Context, Result, bail};

use crate::metadata::extract_header;
use crate::normalize::normalize;
use crate::serialize::{COLUMN_COUNT, CUSTOMER_NAME_LABEL, HEADER_LINE, STATEMENT_PERIOD_LABEL};
use crate::types::{CustomerHeader, Extraction, TransactionRecord};

fn optional(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

fn parse_metadata(lines: &[&str]) -> Result<Option<CustomerHeader>> {
    let mut name = None;
    let mut period = None;

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(v) = line.strip_prefix(CUSTOMER_NAME_LABEL) {
            name = Some(v.trim().to_string());
        } else if let Some(v) = line.strip_prefix(STATEMENT_PERIOD_LABEL) {
            period = Some(v.trim().to_string());
        } else {
            bail!("line {}: unexpected text before header line: {line:?}", idx + 1);
        }
    }

    match (name, period) {
        (Some(name), Some(period)) => Ok(Some(CustomerHeader { name, period })),
        (None, None) => Ok(None),
        _ => bail!("incomplete customer block: both name and period are required"),
    }
}

/// Parse canonical text. Text without the header line is treated as fallback
/// output: it is returned as `Unrecognized`, with the customer block
/// re-derived from the text itself.
pub fn read_canonical(input: &str) -> Result<Extraction> {
    let lines: Vec<&str> = input.lines().collect();
    let Some(header_idx) = lines.iter().position(|l| l.trim_end() == HEADER_LINE) else {
        let text = normalize(input);
        let header = extract_header(&text);
        return Ok(Extraction::Unrecognized {
            header,
            text: text.into_string(),
        });
    };

    let header = parse_metadata(&lines[..header_idx])?;
    let body = lines[header_idx + 1..].join("\n");

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.context("reading canonical row")?;
        let line_no = header_idx + 1 + row.position().map_or(0, |p| p.line() as usize);
        if row.len() != COLUMN_COUNT {
            bail!(
                "line {line_no}: expected {COLUMN_COUNT} fields, found {}",
                row.len()
            );
        }
        let field = |i: usize| row.get(i).unwrap_or_default();
        if field(5).is_empty() {
            bail!("line {line_no}: balance is required");
        }

        records.push(TransactionRecord {
            transaction_date: field(0).to_string(),
            value_date: field(1).to_string(),
            reference: field(2).to_string(),
            debit_amount: optional(field(3)),
            credit_amount: optional(field(4)),
            balance: field(5).to_string(),
            branch: field(6).to_string(),
            remarks: field(7).to_string(),
        });
    }

    Ok(Extraction::Structured { header, records })
}
