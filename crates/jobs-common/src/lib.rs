//! Shared utilities for the job posting pipeline crates.
//!
//! Polars helpers used by ingest, merge and normalization to read cells
//! regardless of the dtype a reader inferred.

pub mod polars;

pub use polars::{
    any_to_string, any_to_string_non_empty, column_optional_values, format_numeric, has_column,
};
