//! Pre-parse payload fix-ups
//!
//! Some versions of the mobile app export a malformed header: the
//! `converted currency` column is labeled `currency` a second time, which
//! makes column lookup by name ambiguous. The normalizer rewrites that
//! known variant to the canonical 8-column header before parsing; every
//! other line passes through unchanged. Data rows are never inspected:
//! the header rewrite alone fixes the alignment.

use std::borrow::Cow;
use tracing::info;

/// The canonical 8-column header line
pub const CANONICAL_HEADER: &str =
    "date,account,category,amount,currency,converted amount,converted currency,description";

/// The known malformed header variant with a duplicated `currency` label
const DUPLICATED_CURRENCY_HEADER: &str =
    "date,account,category,amount,currency,converted amount,currency,description";

/// UTF-8 byte-order mark carried by the mobile app's exports
pub const BOM: &str = "\u{feff}";

/// Strip a leading UTF-8 byte-order mark, if present
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Rewrite the known malformed header variant to the canonical header
///
/// Only the first line is considered, and only an exact match of the
/// duplicated-`currency` variant is rewritten; an unrecognized header is
/// left for the parser to reject with a precise error.
pub fn normalize_header(text: &str) -> Cow<'_, str> {
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (text, None),
    };

    if first.trim_end_matches('\r') != DUPLICATED_CURRENCY_HEADER {
        return Cow::Borrowed(text);
    }

    info!("rewriting duplicated-currency header to the canonical column set");
    match rest {
        Some(rest) => Cow::Owned(format!("{CANONICAL_HEADER}\n{rest}")),
        None => Cow::Borrowed(CANONICAL_HEADER),
    }
}
