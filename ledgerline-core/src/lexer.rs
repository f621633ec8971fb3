//! Word-level lexer over normalized statement text.
//!
//! Each space-separated word is classified once. The scanner then matches a
//! fixed grammar over the resulting token kinds instead of re-running a
//! compound pattern against the raw string.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedText;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-[A-Za-z]{3}-\d{4}$").expect("valid date regex"));

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^'[A-Za-z0-9]+$").expect("valid reference regex"));

// Either properly grouped (1,234,567.89) or ungrouped (1234.89); never both.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}$").expect("valid amount regex")
});

/// Words that open the remarks column. Matching is ASCII case-insensitive on
/// the word's leading alphanumeric run, so `NIP/TRF` and `VAT:` both count.
pub const REMARK_KEYWORDS: &[&str] = &[
    "TRANSFER",
    "TRF",
    "NIP",
    "POS",
    "ATM",
    "USSD",
    "FEE",
    "FEES",
    "CHARGE",
    "CHARGES",
    "COMMISSION",
    "COMM",
    "VAT",
    "TAX",
    "STAMP",
    "SMS",
    "ALERT",
    "NOTIFICATION",
    "INTEREST",
    "REVERSAL",
    "DEPOSIT",
    "WITHDRAWAL",
    "CHEQUE",
    "AIRTIME",
    "MAINTENANCE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// `DD-Mon-YYYY`
    Date,
    /// Apostrophe followed by alphanumerics.
    Reference,
    /// Digits with optional thousands separators and exactly two decimals.
    Amount,
    /// Remark-introducer word from [`REMARK_KEYWORDS`].
    Keyword,
    Text,
}

/// A classified word with its byte span in the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

pub fn is_remark_keyword(word: &str) -> bool {
    let head = word
        .split(|c: char| !c.is_ascii_alphanumeric())
        .next()
        .unwrap_or_default();
    !head.is_empty() && REMARK_KEYWORDS.iter().any(|kw| head.eq_ignore_ascii_case(kw))
}

pub fn classify(word: &str) -> TokenKind {
    if DATE_RE.is_match(word) {
        TokenKind::Date
    } else if REFERENCE_RE.is_match(word) {
        TokenKind::Reference
    } else if AMOUNT_RE.is_match(word) {
        TokenKind::Amount
    } else if is_remark_keyword(word) {
        TokenKind::Keyword
    } else {
        TokenKind::Text
    }
}

/// Split normalized text on its single spaces and classify every word.
pub fn lex(text: &NormalizedText) -> Vec<Token<'_>> {
    let s = text.as_str();
    let mut tokens = Vec::new();
    let mut offset = 0;

    for word in s.split(' ') {
        let start = offset;
        let end = start + word.len();
        offset = end + 1;
        if word.is_empty() {
            continue;
        }
        tokens.push(Token {
            kind: classify(word),
            text: word,
            start,
            end,
        });
    }

    tokens
}
