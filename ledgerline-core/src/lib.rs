//! ledgerline-core: turn extracted bank-statement text into a canonical,
//! pipe-delimited transaction ledger.
//!
//! Pipeline: normalize whitespace, find the customer block, lex and scan for
//! transaction rows, assemble records, then render canonical rows or fall back
//! to the normalized text when no rows were found. Every step is pure and
//! total.

pub mod canonical;
pub mod lexer;
pub mod metadata;
pub mod normalize;
pub mod scanner;
pub mod serialize;
pub mod types;

use tracing::debug;

pub use canonical::read_canonical;
pub use lexer::{Token, TokenKind, lex};
pub use metadata::extract_header;
pub use normalize::{NormalizedText, normalize};
pub use scanner::{TransactionMatch, assemble, resolve_columns, scan};
pub use serialize::{HEADER_LINE, render_canonical, render_row};
pub use types::{CustomerHeader, Direction, Extraction, TransactionRecord};

/// Run the full pipeline and return the tagged outcome.
pub fn extract(raw: &str) -> Extraction {
    let text = normalize(raw);
    let header = extract_header(&text);
    let records: Vec<TransactionRecord> = scan(&text).iter().map(assemble).collect();

    if records.is_empty() {
        debug!(chars = text.len(), has_header = header.is_some(), "no transaction rows; falling back");
        return Extraction::Unrecognized {
            header,
            text: text.into_string(),
        };
    }

    debug!(rows = records.len(), has_header = header.is_some(), "extracted transaction rows");
    Extraction::Structured { header, records }
}

/// String form of [`extract`]: canonical rows, or the normalized text.
pub fn canonicalize(raw: &str) -> String {
    extract(raw).render()
}
