//! Transaction scanner and record assembler.
//!
//! Grammar over lexer tokens, one row per match:
//!
//! ```text
//! DATE DATE REFERENCE AMOUNT{1,3} WORD* KEYWORD WORD*
//! ```
//!
//! The last amount of the run is the balance; up to two amounts before it are
//! the optional debit/credit columns. Words before the keyword are the branch;
//! the keyword and everything up to the next row anchor (`DATE DATE REFERENCE`)
//! or end of text are the remarks.
//!
//! A failed attempt stops at the next anchor at the latest, and the scan always
//! moves forward, so every token is examined a bounded number of times.

use std::ops::Range;

use tracing::{debug, trace};

use crate::lexer::{Token, TokenKind, lex};
use crate::normalize::NormalizedText;
use crate::types::TransactionRecord;

/// Balance plus the two optional money columns.
const MAX_AMOUNTS: usize = 3;

/// Borrowed view of one matched row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionMatch<'a> {
    pub transaction_date: &'a str,
    pub value_date: &'a str,
    pub reference: &'a str,
    /// Amounts seen before the balance, in source order (0..=2 entries).
    pub leading_amounts: Vec<&'a str>,
    pub balance: &'a str,
    pub branch: &'a str,
    pub remarks: &'a str,
    /// Byte range of the whole row in the normalized text.
    pub span: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TransactionDate,
    ValueDate,
    Reference,
    Amounts,
    Branch,
    Remarks,
}

fn expected_kind(stage: Stage) -> Option<TokenKind> {
    match stage {
        Stage::TransactionDate | Stage::ValueDate => Some(TokenKind::Date),
        Stage::Reference => Some(TokenKind::Reference),
        Stage::Amounts | Stage::Branch | Stage::Remarks => None,
    }
}

fn is_anchor(tokens: &[Token<'_>], i: usize) -> bool {
    matches!(
        tokens.get(i..i + 3),
        Some([a, b, c])
            if a.kind == TokenKind::Date
                && b.kind == TokenKind::Date
                && c.kind == TokenKind::Reference
    )
}

fn slice_between<'a>(text: &'a str, tokens: &[Token<'a>]) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => &text[first.start..last.end],
        _ => "",
    }
}

/// Try to match one row starting at token `start`. Returns the match and the
/// index of the first token after it.
fn match_at<'a>(
    text: &'a str,
    tokens: &[Token<'a>],
    start: usize,
) -> Option<(TransactionMatch<'a>, usize)> {
    let mut stage = Stage::TransactionDate;
    let mut i = start;
    let mut fixed: [&'a str; 3] = [""; 3];
    let mut amounts = 0;
    let mut branch_start = 0;
    let mut keyword_at = 0;

    loop {
        match stage {
            Stage::TransactionDate | Stage::ValueDate | Stage::Reference => {
                let token = tokens.get(i)?;
                if Some(token.kind) != expected_kind(stage) {
                    return None;
                }
                fixed[i - start] = token.text;
                i += 1;
                stage = match stage {
                    Stage::TransactionDate => Stage::ValueDate,
                    Stage::ValueDate => Stage::Reference,
                    _ => Stage::Amounts,
                };
            }
            Stage::Amounts => {
                amounts = tokens[i..]
                    .iter()
                    .take(MAX_AMOUNTS)
                    .take_while(|t| t.kind == TokenKind::Amount)
                    .count();
                if amounts == 0 {
                    trace!(at = tokens[start].start, "anchor without balance");
                    return None;
                }
                i += amounts;
                branch_start = i;
                stage = Stage::Branch;
            }
            Stage::Branch => {
                let token = tokens.get(i)?;
                if is_anchor(tokens, i) {
                    trace!(at = tokens[start].start, "next row began before a remarks keyword");
                    return None;
                }
                if token.kind == TokenKind::Keyword {
                    keyword_at = i;
                    stage = Stage::Remarks;
                }
                i += 1;
            }
            Stage::Remarks => {
                if i >= tokens.len() || is_anchor(tokens, i) {
                    break;
                }
                i += 1;
            }
        }
    }

    let amount_tokens = &tokens[branch_start - amounts..branch_start];
    let (balance, leading) = amount_tokens.split_last()?;
    let end = tokens[i - 1].end;

    let m = TransactionMatch {
        transaction_date: fixed[0],
        value_date: fixed[1],
        reference: fixed[2],
        leading_amounts: leading.iter().map(|t| t.text).collect(),
        balance: balance.text,
        branch: slice_between(text, &tokens[branch_start..keyword_at]),
        remarks: slice_between(text, &tokens[keyword_at..i]),
        span: tokens[start].start..end,
    };
    Some((m, i))
}

/// Find every non-overlapping transaction row, in order of appearance.
pub fn scan(text: &NormalizedText) -> Vec<TransactionMatch<'_>> {
    let tokens = lex(text);
    let mut matches = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match match_at(text.as_str(), &tokens, i) {
            Some((m, next)) => {
                matches.push(m);
                i = next;
            }
            None => i += 1,
        }
    }

    debug!(tokens = tokens.len(), rows = matches.len(), "scanned statement text");
    matches
}

/// Assign the amounts preceding the balance to (debit, credit).
///
/// Two amounts fill both columns in order. A single amount cannot be told
/// apart from text alone and goes to the debit column, the first slot tried.
pub fn resolve_columns<'a>(leading: &[&'a str]) -> (Option<&'a str>, Option<&'a str>) {
    match leading {
        [] => (None, None),
        [only] => (Some(*only), None),
        [debit, credit, ..] => (Some(*debit), Some(*credit)),
    }
}

/// Copy a match verbatim into an owned record.
pub fn assemble(m: &TransactionMatch<'_>) -> TransactionRecord {
    let (debit, credit) = resolve_columns(&m.leading_amounts);
    TransactionRecord {
        transaction_date: m.transaction_date.to_string(),
        value_date: m.value_date.to_string(),
        reference: m.reference.to_string(),
        debit_amount: debit.map(str::to_string),
        credit_amount: credit.map(str::to_string),
        balance: m.balance.to_string(),
        branch: m.branch.trim().to_string(),
        remarks: m.remarks.trim().to_string(),
    }
}
