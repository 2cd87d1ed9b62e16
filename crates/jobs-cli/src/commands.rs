//! Command implementations.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use polars::prelude::{CsvWriter, SerWriter};
use tracing::{info, info_span};

use jobs_filter::{Choice, FilterParams, TableSummary, apply_filters, summarize};
use jobs_model::{ColumnMeta, JobTable};
use jobs_transform::{CpiTable, JobPipeline};

use crate::cli::{CpiArgs, FilterArgs, ListArgs, SourceArgs};
use crate::config::resolve_config;

/// Outcome of `list`.
#[derive(Debug)]
pub struct ListResult {
    pub table: JobTable,
    pub summary: TableSummary,
    /// Optional sources skipped while loading.
    pub warnings: Vec<String>,
    pub total_rows: usize,
}

/// Outcome of `cpi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpiResult {
    pub amount: f64,
    pub year: i32,
    pub as_of: i32,
    pub adjusted: f64,
    /// Latest year in the index, whose prices the result is expressed in.
    pub latest_year: Option<i32>,
}

/// Turns command-line filter flags into [`FilterParams`].
pub fn filter_params(args: &FilterArgs, restricted_marker: &str) -> FilterParams {
    FilterParams {
        salary_low: args.salary_min,
        salary_high: args.salary_max,
        organization: args
            .organization
            .as_deref()
            .map_or(Choice::All, Choice::parse),
        organizations: args.organizations.clone(),
        title: args.title.clone(),
        location: args.location.clone(),
        closing_from: args.closing_from,
        closing_to: args.closing_to,
        restricted: args.restricted,
        restricted_marker: restricted_marker.to_string(),
        chain: args.chain.clone(),
        adjust_for_inflation: args.adjust_inflation,
    }
}

pub fn run_list(args: &ListArgs) -> Result<ListResult> {
    let config = resolve_config(&args.source)?;
    let params = filter_params(&args.filters, &config.restricted_marker);
    let pipeline = JobPipeline::from_config(config).context("build pipeline")?;
    let outcome = pipeline.load_with_outcome(false).context("load postings")?;

    let table = info_span!("filter").in_scope(|| {
        apply_filters(
            &outcome.table,
            &params,
            &CpiTable::default(),
            Local::now().year(),
        )
    });
    info!(
        total = outcome.table.len(),
        selected = table.len(),
        "filtered postings"
    );

    if let Some(path) = &args.output {
        write_csv(&table, path)?;
    }

    Ok(ListResult {
        summary: summarize(&table),
        total_rows: outcome.table.len(),
        warnings: outcome.warnings,
        table,
    })
}

pub fn run_columns(args: &SourceArgs) -> Result<Vec<ColumnMeta>> {
    let config = resolve_config(args)?;
    let pipeline = JobPipeline::from_config(config).context("build pipeline")?;
    let table = pipeline.load(false).context("load postings")?;
    Ok(table.columns())
}

pub fn run_cpi(args: &CpiArgs) -> CpiResult {
    let cpi = CpiTable::default();
    let as_of = args.as_of.unwrap_or_else(|| Local::now().year());
    CpiResult {
        amount: args.amount,
        year: args.year,
        as_of,
        adjusted: cpi.adjust_as_of(args.amount, args.year, as_of),
        latest_year: cpi.latest_year(),
    }
}

/// Writes the table as CSV with the display columns.
pub fn write_csv(table: &JobTable, path: &Path) -> Result<()> {
    let mut frame = table.to_frame().context("build output frame")?;
    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = table.len(), "wrote csv");
    Ok(())
}
