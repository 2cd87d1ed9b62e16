//! Data model for the job posting pipeline.
//!
//! - [`JobRecord`] / [`JobTable`]: the normalized, analysis-ready postings
//! - [`PipelineConfig`] / [`SourceConfig`]: explicit pipeline configuration
//! - [`columns`]: source header names

pub mod columns;
pub mod config;
pub mod enums;
pub mod record;
pub mod table;

pub use config::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_FETCH_TIMEOUT_SECS, PipelineConfig, SourceConfig,
};
pub use enums::{ColumnKind, PayPeriod, SalaryBound, SourceFormat};
pub use record::JobRecord;
pub use table::{ColumnMeta, JobTable};
