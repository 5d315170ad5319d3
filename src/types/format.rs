//! Output format handling
//!
//! The engine renders results in a closed set of formats. Anything outside
//! that set is a normal user-input error (`UnsupportedFormat`), not a crash,
//! so the boundary layer can map it to a client-error response.

use crate::types::error::AggregationError;
use std::fmt;
use std::str::FromStr;

/// Supported result file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values, UTF-8 with byte-order mark
    Csv,
    /// Pretty-printed JSON, plain UTF-8
    Json,
}

impl OutputFormat {
    /// Canonical lowercase name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// File extension used for persisted outputs
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = AggregationError;

    /// Parse a requested output kind, case-insensitively
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` carrying the rejected value verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(AggregationError::unsupported_format(s)),
        }
    }
}
