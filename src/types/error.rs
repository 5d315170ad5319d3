//! Error types for the Monefy aggregation engine
//!
//! This module defines all error kinds the engine can surface to its caller.
//! Each kind is a distinct, inspectable variant so the boundary layer can
//! pattern-match without catching a generic failure.
//!
//! # Error Categories
//!
//! - **NoSnapshot**: no usable snapshot file among the candidates
//! - **MalformedRow**: parse-time structural failure on a specific line
//! - **UnsupportedFormat**: requested output kind outside `{csv, json}`
//! - **Io**: boundary read/write failure with the opaque cause attached

use thiserror::Error;

/// Main error type for the aggregation engine
///
/// `UnsupportedFormat` is the only kind expected to reach an external user
/// directly (a client-side input error); the other variants indicate
/// upstream data or connectivity problems.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// No snapshot file available
    ///
    /// Raised when the candidate set is empty outright, or when every
    /// candidate name fails to parse as `monefy-<timestamp>.csv`.
    #[error("no snapshot file available")]
    NoSnapshot,

    /// A snapshot row failed to parse
    ///
    /// Fatal for the whole aggregation: a partial financial summary must
    /// never silently under-report, so the first malformed row aborts the
    /// parse. The line number is 1-based and counts the header line.
    #[error("malformed row at line {line}: {message}")]
    MalformedRow {
        /// Line number where the failure occurred
        line: u64,
        /// Description of the failure
        message: String,
    },

    /// Requested output format is not supported
    ///
    /// Carries the rejected value so the boundary layer can echo it back
    /// in a client-error response.
    #[error("{format} format not supported")]
    UnsupportedFormat {
        /// The format string that was rejected
        format: String,
    },

    /// I/O failure at the storage boundary
    ///
    /// Propagated without retry; retry policy belongs to the boundary
    /// collaborator.
    #[error("I/O failure: {source}")]
    Io {
        /// The underlying cause
        #[from]
        source: std::io::Error,
    },
}

// Conversion from csv::Error: write-side I/O failures keep their cause,
// everything else is a malformed payload at the reported position.
impl From<csv::Error> for AggregationError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map_or(0, |pos| pos.line());
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(source) => AggregationError::Io { source },
            _ => AggregationError::MalformedRow { line, message },
        }
    }
}

impl AggregationError {
    /// Create a MalformedRow error
    pub fn malformed_row(line: u64, message: impl Into<String>) -> Self {
        AggregationError::MalformedRow {
            line,
            message: message.into(),
        }
    }

    /// Create an UnsupportedFormat error carrying the rejected value
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        AggregationError::UnsupportedFormat {
            format: format.into(),
        }
    }
}
