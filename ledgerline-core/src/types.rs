use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layout used by the statement columns, e.g. `15-Jan-2024`.
pub const STATEMENT_DATE_FORMAT: &str = "%d-%b-%Y";

/// Customer name and statement period found in the statement's title block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerHeader {
    pub name: String,
    pub period: String,
}

/// One statement row, with every field kept as the literal source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_date: String,
    pub value_date: String,
    /// Includes the leading apostrophe, e.g. `'TRF0001`.
    pub reference: String,
    pub debit_amount: Option<String>,
    pub credit_amount: Option<String>,
    pub balance: String,
    pub branch: String,
    pub remarks: String,
}

/// Which optional money column a record populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Debit,
    Credit,
}

impl TransactionRecord {
    pub fn transaction_date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.transaction_date, STATEMENT_DATE_FORMAT).ok()
    }

    pub fn value_date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.value_date, STATEMENT_DATE_FORMAT).ok()
    }

    /// `None` when neither or both of debit/credit are populated.
    ///
    /// A lone amount always lands in the debit slot during extraction, so
    /// `Some(Debit)` here reflects column position, not verified money flow.
    pub fn direction(&self) -> Option<Direction> {
        match (&self.debit_amount, &self.credit_amount) {
            (Some(_), None) => Some(Direction::Debit),
            (None, Some(_)) => Some(Direction::Credit),
            _ => None,
        }
    }
}

/// Outcome of running the pipeline over one statement text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extraction {
    /// At least one transaction row was recovered.
    Structured {
        header: Option<CustomerHeader>,
        records: Vec<TransactionRecord>,
    },
    /// No transaction-shaped text was found; `text` is the normalized input.
    Unrecognized {
        header: Option<CustomerHeader>,
        text: String,
    },
}

impl Extraction {
    pub fn is_structured(&self) -> bool {
        matches!(self, Extraction::Structured { .. })
    }

    pub fn header(&self) -> Option<&CustomerHeader> {
        match self {
            Extraction::Structured { header, .. } | Extraction::Unrecognized { header, .. } => {
                header.as_ref()
            }
        }
    }

    /// Empty for `Unrecognized`.
    pub fn records(&self) -> &[TransactionRecord] {
        match self {
            Extraction::Structured { records, .. } => records,
            Extraction::Unrecognized { .. } => &[],
        }
    }
}
