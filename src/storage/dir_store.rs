//! Local-directory snapshot store
//!
//! Reads snapshots from one directory and writes result files into
//! another. This is the store the CLI wires up; it also doubles as the
//! integration-test harness since it needs nothing but a temp directory.

use crate::storage::SnapshotStore;
use crate::types::{AggregationError, OutputFormat};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Filesystem-backed snapshot store
#[derive(Debug, Clone)]
pub struct DirStore {
    snapshot_dir: PathBuf,
    output_dir: PathBuf,
}

impl DirStore {
    /// Create a store reading snapshots from `snapshot_dir` and writing
    /// outputs into `output_dir`
    ///
    /// The output directory is created lazily on first write.
    pub fn new(snapshot_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        DirStore {
            snapshot_dir: snapshot_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl SnapshotStore for DirStore {
    /// List `.csv` files in the snapshot directory
    ///
    /// Names are sorted so the candidate order (and with it, timestamp
    /// tie-breaking) is deterministic across platforms.
    fn list_snapshots(&self) -> Result<Vec<String>, AggregationError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.snapshot_dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.ends_with(".csv") {
                names.push(name.to_string());
            }
        }
        names.sort();
        debug!(count = names.len(), "listed snapshot candidates");
        Ok(names)
    }

    fn fetch_snapshot(&self, name: &str) -> Result<Vec<u8>, AggregationError> {
        Ok(fs::read(self.snapshot_dir.join(name))?)
    }

    fn persist_output(
        &self,
        logical_name: &str,
        bytes: &[u8],
        format: OutputFormat,
    ) -> Result<String, AggregationError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(format!("{logical_name}.{}", format.extension()));
        fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }
}
