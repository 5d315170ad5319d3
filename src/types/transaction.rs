//! Transaction record type for Monefy snapshot rows
//!
//! One `Transaction` is one parsed CSV row from a backup snapshot. Records
//! are created during the parse, immutable afterwards, and discarded once
//! aggregation or serialization completes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Column names of the canonical Monefy export header, in order
///
/// Parsing maps columns by name rather than position, so a snapshot may
/// carry these in any order; serialization always writes this order.
pub const CANONICAL_COLUMNS: [&str; 8] = [
    "date",
    "account",
    "category",
    "amount",
    "currency",
    "converted amount",
    "converted currency",
    "description",
];

/// Date layout used by the mobile app's CSV exports
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One parsed snapshot row
///
/// Amounts are exact decimals: negative means expense, positive means
/// income. `category` is an open set of strings, empty for transfers
/// without a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Calendar date of the transaction, in the export's `dd/MM/yyyy` layout
    #[serde(serialize_with = "export_date")]
    pub date: NaiveDate,

    /// Account the transaction was booked against
    pub account: String,

    /// Category label; empty for uncategorized transfers
    pub category: String,

    /// Signed amount in the account currency
    pub amount: Decimal,

    /// Account currency code
    pub currency: String,

    /// Signed amount converted to the base currency
    #[serde(rename = "converted amount")]
    pub converted_amount: Decimal,

    /// Base currency code
    #[serde(rename = "converted currency")]
    pub converted_currency: String,

    /// Free-text note, if any
    pub description: Option<String>,
}

/// Serialize a record date in the export layout rather than ISO-8601,
/// so JSON listings carry the same values as the source snapshot.
fn export_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}
