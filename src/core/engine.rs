//! Aggregation engine
//!
//! This module provides the AggregationEngine that orchestrates one
//! aggregation request end to end: candidate listing, snapshot selection,
//! payload normalization and parse, optional summarization, and result
//! output. All I/O goes through the injected [`SnapshotStore`].
//!
//! Each invocation is synchronous, single-threaded and independent: the
//! engine holds no session, cache or cursor, so concurrent calls from
//! different callers are safe as long as each input file is immutable
//! while read.

use crate::core::{aggregator, snapshot};
use crate::io::csv_format;
use crate::io::result_writer::{self, ResultPayload};
use crate::storage::SnapshotStore;
use crate::types::{AggregationError, OutputFormat, Transaction};
use tracing::info;

/// Orchestrates the aggregation pipeline over an injected store
pub struct AggregationEngine<S> {
    store: S,
}

impl<S: SnapshotStore> AggregationEngine<S> {
    /// Create an engine over the given snapshot store
    pub fn new(store: S) -> Self {
        AggregationEngine { store }
    }

    /// Name of the authoritative snapshot among the current candidates
    ///
    /// # Errors
    ///
    /// Returns `NoSnapshot` when the store lists no usable candidate.
    pub fn latest_snapshot_name(&self) -> Result<String, AggregationError> {
        let candidates = self.store.list_snapshots()?;
        info!(candidates = candidates.len(), "selecting authoritative snapshot");
        let latest = snapshot::select_latest(candidates.iter().map(String::as_str))?;
        Ok(latest.to_string())
    }

    /// Run the full pipeline and return the written result's identifier
    ///
    /// The latest snapshot is parsed into records; with `summarize` the
    /// records reduce to a balance summary first. The result is rendered
    /// in `output_kind` and persisted under the source snapshot's stem,
    /// prefixed `summarized_` for summaries.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFormat` when `output_kind` is outside `{csv, json}`
    /// - `NoSnapshot` when no usable candidate exists
    /// - `MalformedRow` when any snapshot row fails to parse
    /// - `Io` on storage boundary failures
    pub fn get_result(
        &self,
        output_kind: &str,
        summarize: bool,
    ) -> Result<String, AggregationError> {
        // Reject an unsupported kind before any I/O happens.
        let format: OutputFormat = output_kind.parse()?;

        let name = self.latest_snapshot_name()?;
        info!(snapshot = %name, %format, summarize, "aggregating snapshot");
        let transactions = self.load_snapshot(&name)?;
        let stem = snapshot_stem(&name);

        if summarize {
            let summary = aggregator::summarize(&transactions);
            result_writer::write_result(
                &self.store,
                &format!("summarized_{stem}"),
                &ResultPayload::Summary(&summary),
                format,
            )
        } else {
            result_writer::write_result(
                &self.store,
                stem,
                &ResultPayload::Transactions(&transactions),
                format,
            )
        }
    }

    /// Mirror every candidate snapshot through the storage boundary
    ///
    /// Fetches each listed snapshot and persists its raw bytes unchanged,
    /// returning the written identifiers in listing order.
    pub fn save_snapshots(&self) -> Result<Vec<String>, AggregationError> {
        let mut saved = Vec::new();
        for name in self.store.list_snapshots()? {
            info!(snapshot = %name, "mirroring snapshot");
            let bytes = self.store.fetch_snapshot(&name)?;
            saved.push(
                self.store
                    .persist_output(snapshot_stem(&name), &bytes, OutputFormat::Csv)?,
            );
        }
        Ok(saved)
    }

    fn load_snapshot(&self, name: &str) -> Result<Vec<Transaction>, AggregationError> {
        let bytes = self.store.fetch_snapshot(name)?;
        let text = String::from_utf8_lossy(&bytes);
        csv_format::parse_transactions(&text)
    }
}

/// Snapshot name without its `.csv` extension
fn snapshot_stem(name: &str) -> &str {
    name.strip_suffix(snapshot::SNAPSHOT_EXTENSION).unwrap_or(name)
}
