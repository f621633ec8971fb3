//! Customer-statement title block: customer name and statement period.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::normalize::NormalizedText;
use crate::types::CustomerHeader;

// Period is either a `DATE to DATE` range or free text up to the column
// header, an opening-balance line, the first date, or end of text.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)customer\s+statement\s*:?\s*",
        r"(?:customer\s+name\s*:?\s*)?",
        r"(?P<name>.+?)\s*",
        r"statement\s+period\s*:?\s*",
        r"(?:(?P<range>\d{2}-[a-z]{3}-\d{4}\s*(?:to|-)\s*\d{2}-[a-z]{3}-\d{4})",
        r"|(?P<free>.+?)(?:\s+(?:trans\.?\s+date|opening\s+balance|\d{2}-[a-z]{3}-\d{4})|$))",
    ))
    .expect("valid customer header regex")
});

/// Find the first customer-statement title block, if any.
pub fn extract_header(text: &NormalizedText) -> Option<CustomerHeader> {
    let caps = HEADER_RE.captures(text.as_str())?;
    let name = caps.name("name")?.as_str().trim();
    let period = caps.name("range").or_else(|| caps.name("free"))?.as_str().trim();
    if name.is_empty() || period.is_empty() {
        return None;
    }
    trace!(name, period, "found customer statement header");
    Some(CustomerHeader {
        name: name.to_string(),
        period: period.to_string(),
    })
}
