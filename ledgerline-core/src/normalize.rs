//! Whitespace normalization applied before any extraction.
//!
//! Upstream text extraction leaves columns padded with runs of spaces, tabs
//! and line breaks. Every later stage works on a single-spaced string so that
//! token boundaries are exactly one `' '` apart.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Statement text with every whitespace run collapsed to one space and no
/// leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapse whitespace runs (Unicode `White_Space`, newlines included) into
/// single spaces and trim both ends. Total and idempotent.
pub fn normalize(raw: &str) -> NormalizedText {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    NormalizedText(out)
}
