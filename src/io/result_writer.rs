//! Result rendering and persistence
//!
//! The writer takes a target representation (raw records or a balance
//! summary), renders it in the requested format, and persists the bytes
//! through the storage boundary under a caller-provided logical name. The
//! identifier returned by the store is handed back to the caller.

use crate::io::{csv_format, json_format};
use crate::storage::SnapshotStore;
use crate::types::{AggregationError, BalanceSummary, OutputFormat, Transaction};
use tracing::info;

/// Target representation to render
#[derive(Debug)]
pub enum ResultPayload<'a> {
    /// The raw per-transaction listing
    Transactions(&'a [Transaction]),
    /// The summarized balance
    Summary(&'a BalanceSummary),
}

/// Render the payload and persist it under the logical name
///
/// # Errors
///
/// Propagates `Io` failures from rendering or the storage boundary.
/// Format validation happens before this point, when the requested kind
/// string is parsed into an [`OutputFormat`].
pub fn write_result<S>(
    store: &S,
    logical_name: &str,
    payload: &ResultPayload<'_>,
    format: OutputFormat,
) -> Result<String, AggregationError>
where
    S: SnapshotStore + ?Sized,
{
    let mut bytes = Vec::new();
    match (payload, format) {
        (ResultPayload::Transactions(transactions), OutputFormat::Csv) => {
            csv_format::write_transactions_csv(transactions, &mut bytes)?
        }
        (ResultPayload::Transactions(transactions), OutputFormat::Json) => {
            json_format::write_transactions_json(transactions, &mut bytes)?
        }
        (ResultPayload::Summary(summary), OutputFormat::Csv) => {
            csv_format::write_summary_csv(summary, &mut bytes)?
        }
        (ResultPayload::Summary(summary), OutputFormat::Json) => {
            json_format::write_summary_json(summary, &mut bytes)?
        }
    }

    let written = store.persist_output(logical_name, &bytes, format)?;
    info!(path = %written, "wrote aggregation result");
    Ok(written)
}
