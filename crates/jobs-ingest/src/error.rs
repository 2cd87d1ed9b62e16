//! Error types for source retrieval and loading.

use thiserror::Error;

/// Errors raised while fetching, decoding, or validating a source table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Retrieval ===
    /// The retrieval collaborator failed: non-success status, timeout, or I/O fault.
    #[error("source unavailable: {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },

    // === Decoding ===
    /// The bytes are not a readable CSV or Parquet table.
    #[error("failed to parse source {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    // === Contract ===
    /// A source is missing a column the pipeline depends on.
    #[error("source {source_name} is missing required column '{column}'")]
    SchemaMismatch {
        source_name: String,
        column: String,
    },

    // === DataFrame ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    // === Cache ===
    #[error("cache unavailable: {message}")]
    Cache { message: String },
}

impl IngestError {
    pub fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn schema_mismatch(source_name: impl Into<String>, column: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            source_name: source_name.into(),
            column: column.into(),
        }
    }

    /// True for failures that an optional source may absorb by being skipped.
    ///
    /// Schema mismatches are contract violations and never qualify.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. } | Self::Parse { .. })
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
