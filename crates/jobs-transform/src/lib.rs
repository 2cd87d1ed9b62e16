//! Turning raw job snapshots into one normalized table.
//!
//! - [`salary`]: salary text to annualized bounds
//! - [`cpi`]: inflation adjustment against a fixed CPI table
//! - [`datetime`]: closing-date text to calendar dates
//! - [`merge`]: stacking, de-duplicating, and joining source frames
//! - [`normalize`]: typed [`JobRecord`](jobs_model::JobRecord)s from the merged frame
//! - [`JobPipeline`]: the cached end-to-end entry point

pub mod cpi;
pub mod datetime;
mod error;
pub mod merge;
pub mod normalize;
mod pipeline;
pub mod salary;

pub use cpi::{CpiTable, adjust_table};
pub use error::{PipelineError, Result};
pub use merge::{SourceFrame, canonical_job_id, left_join, merge_sources};
pub use normalize::{NormalizeReport, normalize_frame};
pub use pipeline::{JobPipeline, PipelineOutcome};
pub use salary::{parse_salary, parse_salary_range};
