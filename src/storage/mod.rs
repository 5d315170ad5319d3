//! Storage boundary
//!
//! The engine performs no I/O of its own: candidate enumeration, snapshot
//! fetching and output persistence are all behind the [`SnapshotStore`]
//! trait, injected by the caller. The engine propagates store failures
//! without retry; retry policy belongs to the collaborator behind the
//! trait (a cloud client, a local directory, a test double).

pub mod dir_store;

pub use dir_store::DirStore;

use crate::types::{AggregationError, OutputFormat};

/// Boundary to wherever snapshot files live
pub trait SnapshotStore {
    /// Names of candidate snapshot files, zero or more
    fn list_snapshots(&self) -> Result<Vec<String>, AggregationError>;

    /// Raw bytes of one named snapshot
    ///
    /// # Errors
    ///
    /// Returns `Io` when the snapshot is unavailable.
    fn fetch_snapshot(&self, name: &str) -> Result<Vec<u8>, AggregationError>;

    /// Persist rendered output bytes under a logical name
    ///
    /// Returns a stable identifier (a path) for the written file.
    fn persist_output(
        &self,
        logical_name: &str,
        bytes: &[u8],
        format: OutputFormat,
    ) -> Result<String, AggregationError>;
}
