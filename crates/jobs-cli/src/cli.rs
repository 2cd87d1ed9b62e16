//! CLI argument definitions for the job explorer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use jobs_filter::{ChainLink, RestrictedMode};

#[derive(Parser)]
#[command(
    name = "jobs-explorer",
    version,
    about = "Merge, normalize, and filter job posting snapshots",
    long_about = "Merge job posting snapshots (CSV or Parquet) into one de-duplicated table,\n\
                  annualize salaries, and slice the result with composable filters."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load, filter, and print postings.
    List(ListArgs),

    /// Print the output columns and their types.
    Columns(SourceArgs),

    /// Restate an amount from a past year in latest-year prices.
    Cpi(CpiArgs),
}

/// Where the snapshots come from.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Pipeline configuration file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Snapshot location (path or URL), most recent first. Replaces configured sources.
    #[arg(long = "source", value_name = "LOCATION")]
    pub sources: Vec<String>,

    /// Enrichment source joined on the job id.
    #[arg(long = "extended", value_name = "LOCATION")]
    pub extended: Option<String>,

    /// Keep postings whose closing date has passed.
    #[arg(long = "include-closed")]
    pub include_closed: bool,

    /// Posting URL pattern with a `{job_id}` placeholder.
    #[arg(long = "link-template", value_name = "URL")]
    pub link_template: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// Lowest acceptable annual salary (posting minimum must be at least this).
    #[arg(long = "salary-min", value_name = "AMOUNT")]
    pub salary_min: Option<f64>,

    /// Highest acceptable annual salary (posting maximum must be at most this).
    #[arg(long = "salary-max", value_name = "AMOUNT")]
    pub salary_max: Option<f64>,

    /// Exact organization ("All" for every organization).
    #[arg(long = "organization", value_name = "NAME")]
    pub organization: Option<String>,

    /// Organization multi-select; repeat to add more.
    #[arg(long = "org", value_name = "NAME")]
    pub organizations: Vec<String>,

    /// Case-insensitive title substring.
    #[arg(long = "title", value_name = "TEXT")]
    pub title: Option<String>,

    /// Case-insensitive location substring.
    #[arg(long = "location", value_name = "TEXT")]
    pub location: Option<String>,

    /// Earliest closing date (YYYY-MM-DD).
    #[arg(long = "closing-from", value_name = "DATE")]
    pub closing_from: Option<NaiveDate>,

    /// Latest closing date (YYYY-MM-DD).
    #[arg(long = "closing-to", value_name = "DATE")]
    pub closing_to: Option<NaiveDate>,

    /// Restricted (TDA) postings: include, exclude, or only.
    #[arg(long = "restricted", value_name = "MODE", default_value = "include")]
    pub restricted: RestrictedMode,

    /// Chained text filter `combinator:field:text`, folded left to right.
    #[arg(long = "filter", value_name = "LINK")]
    pub chain: Vec<ChainLink>,

    /// Restate salaries in latest-year prices.
    #[arg(long = "adjust-inflation")]
    pub adjust_inflation: bool,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Write the filtered table to a CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print at most this many rows.
    #[arg(long = "limit", value_name = "N", default_value_t = 50)]
    pub limit: usize,

    /// Print the summary instead of the rows.
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Args)]
pub struct CpiArgs {
    /// Amount in the prices of YEAR.
    pub amount: f64,

    /// Year the amount was paid in.
    pub year: i32,

    /// Year treated as the present (defaults to the current calendar year).
    #[arg(long = "as-of", value_name = "YEAR")]
    pub as_of: Option<i32>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
