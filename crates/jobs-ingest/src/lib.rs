//! Job snapshot ingestion.
//!
//! This crate covers everything between a configured source location and a
//! Polars [`DataFrame`](polars::prelude::DataFrame):
//!
//! - **Retrieval**: [`SourceFetcher`] with HTTP (bounded timeout) and file implementations
//! - **Decoding**: CSV (all columns as text) and Parquet via [`read_table`]
//! - **Caching**: [`TtlCache`] for fill-once-per-TTL results
//!
//! # Example
//!
//! ```ignore
//! use jobs_ingest::{LocationFetcher, load_source};
//! use jobs_model::{PipelineConfig, SourceConfig};
//!
//! let config = PipelineConfig::new(vec![SourceConfig::new("current", "data/current.csv")]);
//! let fetcher = LocationFetcher::from_config(&config)?;
//! let df = load_source(&fetcher, &config.sources[0])?;
//! ```

mod cache;
mod error;
mod fetch;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Retrieval ===
pub use fetch::{FileFetcher, HttpFetcher, LocationFetcher, SourceFetcher, is_remote};

// === Decoding ===
pub use reader::{load_source, read_table};

// === Caching ===
pub use cache::TtlCache;
