//! Pipeline configuration.
//!
//! Everything the pipeline needs from its environment arrives through
//! [`PipelineConfig`]; nothing is read from globals or process state inside
//! the library crates.

use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::columns;
use crate::enums::SourceFormat;

/// Default cache lifetime for a merged table (one hour).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Default bound on a single source fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// One raw tabular source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Short label used in logs and warnings (e.g. "current").
    pub name: String,
    /// URL (`http://`, `https://`) or local file path.
    pub location: String,
    /// Explicit format; inferred from the location's extension when absent.
    #[serde(default)]
    pub format: Option<SourceFormat>,
    /// A required source halts the run when it cannot be loaded; an optional
    /// one is skipped with a warning.
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl SourceConfig {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            format: None,
            required: true,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn resolved_format(&self) -> SourceFormat {
        self.format
            .unwrap_or_else(|| SourceFormat::from_location(&self.location))
    }
}

/// Configuration for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Snapshot sources, most recent first. Earlier sources win on duplicate ids.
    pub sources: Vec<SourceConfig>,
    /// Optional enrichment source joined on the key column.
    pub extended: Option<SourceConfig>,
    /// Column that identifies a posting.
    pub key_column: String,
    /// Name of the environment variable holding the retrieval token. Resolved
    /// by the binary, never by the library.
    pub auth_token_env: Option<String>,
    /// Retrieval token, filled in by the caller.
    #[serde(skip)]
    pub auth_token: Option<String>,
    pub fetch_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    /// Literal timezone abbreviations stripped from closing-date text.
    pub timezone_tokens: Vec<String>,
    /// Offset of the source timezone from UTC, used to decide what "today" is.
    pub utc_offset_minutes: i32,
    /// Drop postings whose closing date is already past.
    pub upcoming_only: bool,
    /// Posting URL pattern with a `{job_id}` placeholder.
    pub link_template: Option<String>,
    /// Title marker identifying restricted (TDA) postings.
    pub restricted_marker: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            extended: None,
            key_column: columns::JOB_ID.to_string(),
            auth_token_env: None,
            auth_token: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            timezone_tokens: vec!["EST".to_string(), "EDT".to_string(), "ET".to_string()],
            utc_offset_minutes: -300,
            upcoming_only: true,
            link_template: None,
            restricted_marker: "TDA".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new(sources: Vec<SourceConfig>) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_extended(mut self, extended: SourceConfig) -> Self {
        self.extended = Some(extended);
        self
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    #[must_use]
    pub fn with_upcoming_only(mut self, enable: bool) -> Self {
        self.upcoming_only = enable;
        self
    }

    #[must_use]
    pub fn with_link_template(mut self, template: impl Into<String>) -> Self {
        self.link_template = Some(template.into());
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Source timezone as a fixed offset; out-of-range values fall back to UTC.
    pub fn source_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Current calendar date in the source timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.source_offset()).date_naive()
    }

    /// Renders the posting link for an id, if a template is configured.
    pub fn link_for(&self, job_id: &str) -> Option<String> {
        self.link_template
            .as_ref()
            .map(|template| template.replace("{job_id}", job_id))
    }
}
