//! The pipeline entry point: fetch, merge, normalize, cache.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use jobs_ingest::{IngestError, LocationFetcher, SourceFetcher, TtlCache, load_source};
use jobs_model::{JobTable, PipelineConfig, SourceConfig};

use crate::error::{PipelineError, Result};
use crate::merge::{SourceFrame, left_join, merge_sources};
use crate::normalize::{NormalizeReport, normalize_frame};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub table: Arc<JobTable>,
    /// Optional sources skipped during the run.
    pub warnings: Vec<String>,
    pub report: NormalizeReport,
    /// Postings removed because their closing date had passed.
    pub closed_removed: usize,
}

/// Loads, merges, and normalizes the configured sources.
///
/// Results are cached for `cache_ttl_secs`; every reader shares the same
/// `Arc<JobTable>`.
pub struct JobPipeline {
    config: PipelineConfig,
    fetcher: Box<dyn SourceFetcher>,
    cache: TtlCache<PipelineOutcome>,
}

impl JobPipeline {
    pub fn new(config: PipelineConfig, fetcher: Box<dyn SourceFetcher>) -> Self {
        let cache = TtlCache::new(config.cache_ttl());
        Self {
            config,
            fetcher,
            cache,
        }
    }

    /// Builds a pipeline that fetches over HTTP or from disk by location.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let fetcher = LocationFetcher::from_config(&config)?;
        Ok(Self::new(config, Box::new(fetcher)))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the normalized table, served from cache while fresh.
    pub fn load(&self, force_refresh: bool) -> Result<Arc<JobTable>> {
        Ok(self.load_with_outcome(force_refresh)?.table)
    }

    /// Like [`JobPipeline::load`], with the run's warnings and counters.
    pub fn load_with_outcome(&self, force_refresh: bool) -> Result<PipelineOutcome> {
        self.cache
            .get_or_try_fill(force_refresh, || self.run(self.config.today()))
    }

    /// Runs the whole pipeline without touching the cache.
    ///
    /// `today` decides which postings count as closed.
    pub fn run(&self, today: NaiveDate) -> Result<PipelineOutcome> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let mut frames = Vec::with_capacity(self.config.sources.len());
        for source in &self.config.sources {
            if let Some(frame) = self.load_one(source, &mut warnings)? {
                frames.push(frame);
            }
        }
        if frames.is_empty() {
            return Err(PipelineError::NoSources);
        }

        let key = self.config.key_column.as_str();
        let mut merged = info_span!("merge", sources = frames.len()).in_scope(|| {
            let start = Instant::now();
            let merged = merge_sources(&frames, key)?;
            debug!(
                rows = merged.height(),
                duration_ms = start.elapsed().as_millis(),
                "merge complete"
            );
            Ok::<DataFrame, IngestError>(merged)
        })?;

        if let Some(extended) = &self.config.extended
            && let Some(secondary) = self.load_one(extended, &mut warnings)?
        {
            merged = info_span!("join", source = %extended.name)
                .in_scope(|| left_join(&merged, &secondary, key))?;
        }

        let (mut table, report) =
            info_span!("normalize").in_scope(|| normalize_frame(&merged, &self.config));

        let closed_removed = if self.config.upcoming_only {
            table.retain_open(today)
        } else {
            0
        };
        table.sort_by_closing_date();

        info!(
            rows = table.len(),
            closed_removed,
            skipped_sources = warnings.len(),
            duration_ms = start.elapsed().as_millis(),
            "pipeline complete"
        );
        Ok(PipelineOutcome {
            table: Arc::new(table),
            warnings,
            report,
            closed_removed,
        })
    }

    /// Loads one source. Recoverable failures of optional sources become warnings.
    fn load_one(
        &self,
        source: &SourceConfig,
        warnings: &mut Vec<String>,
    ) -> Result<Option<SourceFrame>> {
        let span = info_span!("load_source", source = %source.name);
        let _guard = span.enter();
        let start = Instant::now();

        match load_source(self.fetcher.as_ref(), source) {
            Ok(frame) => {
                debug!(
                    rows = frame.height(),
                    duration_ms = start.elapsed().as_millis(),
                    "source loaded"
                );
                Ok(Some(SourceFrame::new(source.name.clone(), frame)))
            }
            Err(err) if !source.required && err.is_recoverable() => {
                warn!(error = %err, "skipping optional source");
                warnings.push(format!("skipped source {}: {err}", source.name));
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
