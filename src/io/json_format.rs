//! JSON rendering for snapshot rows and summaries
//!
//! Output is pretty-printed. Decimal amounts serialize as exact decimal
//! strings (the `rust_decimal` serde representation), never through a
//! lossy binary-float path.

use crate::types::{AggregationError, BalanceSummary, Transaction};
use std::io::Write;

/// Write the raw transaction listing as a JSON array
pub fn write_transactions_json(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), AggregationError> {
    serde_json::to_writer_pretty(&mut *output, transactions).map_err(io_failure)?;
    Ok(())
}

/// Write a balance summary as a single JSON object
///
/// Category totals flatten into the same object as `income`, `expense`
/// and `balance`, mirroring the summary's CSV column layout.
pub fn write_summary_json(
    summary: &BalanceSummary,
    output: &mut dyn Write,
) -> Result<(), AggregationError> {
    serde_json::to_writer_pretty(&mut *output, summary).map_err(io_failure)?;
    Ok(())
}

// Serialization of these types cannot itself fail; any error left is the
// underlying writer's.
fn io_failure(error: serde_json::Error) -> AggregationError {
    AggregationError::Io {
        source: error.into(),
    }
}
