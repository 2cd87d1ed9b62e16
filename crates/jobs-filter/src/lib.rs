//! Filtering normalized job tables.
//!
//! - [`Predicate`] / [`ChainLink`]: single-record tests and how they chain
//! - [`evaluate`] / [`mask`]: strict left-to-right chain folding
//! - [`FilterParams`] / [`apply_filters`]: the full set of user selections
//! - [`summarize`]: the aggregates behind the summary view
//!
//! # Example
//!
//! ```
//! use jobs_filter::{ChainLink, evaluate};
//! use jobs_model::{JobRecord, JobTable};
//!
//! let table: JobTable = ["Policy Analyst", "Clerk"]
//!     .into_iter()
//!     .map(|title| JobRecord { job_title: title.into(), ..JobRecord::default() })
//!     .collect();
//! let chain: Vec<ChainLink> = vec!["and:title:analyst".parse().unwrap()];
//! assert_eq!(evaluate(&table, &chain).len(), 1);
//! ```

mod engine;
mod error;
mod params;
mod predicate;
mod summary;

pub use engine::{evaluate, mask, matches_chain};
pub use error::FilterError;
pub use params::{DEFAULT_RESTRICTED_MARKER, FilterParams, RestrictedMode, apply_filters};
pub use predicate::{ChainLink, Choice, Combinator, NumericField, Predicate, TextField};
pub use summary::{TableSummary, summarize};
