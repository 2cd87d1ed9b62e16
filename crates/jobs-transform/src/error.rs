//! Pipeline errors.

use jobs_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// No configured snapshot source could be loaded.
    #[error("no snapshot source could be loaded")]
    NoSources,
}

impl From<polars::prelude::PolarsError> for PipelineError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Ingest(err.into())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
