//! Combining snapshot sources into one de-duplicated frame.
//!
//! Sources arrive most recent first. After artifact columns are removed and
//! every column is cast to text, the frames are stacked in that order and
//! de-duplicated on the canonical key, so the most recent snapshot of a
//! posting wins.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use polars::prelude::{
    BooleanChunked, Column, DataFrame, DataType, IntoColumn, NamedFrom, NewChunkedArray, Series,
};
use regex::Regex;
use tracing::{debug, warn};

use jobs_common::{column_optional_values, has_column};
use jobs_ingest::{IngestError, Result};
use jobs_model::columns;

/// Index columns leaked by spreadsheet and dataframe exports.
static UNNAMED_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Unnamed.*|__index_level_\d+__|\s*)$").expect("Invalid unnamed column regex")
});

/// One decoded source and the label used in errors and logs.
#[derive(Debug, Clone)]
pub struct SourceFrame {
    pub name: String,
    pub frame: DataFrame,
}

impl SourceFrame {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }
}

/// True for header names that are export artifacts rather than data.
pub fn is_unnamed_column(name: &str) -> bool {
    UNNAMED_COLUMN.is_match(name)
}

/// Canonical form of a posting identifier.
///
/// Grouping punctuation is removed and a float artifact `.0` suffix on an
/// all-digit id is dropped.
///
/// ```
/// use jobs_transform::merge::canonical_job_id;
///
/// assert_eq!(canonical_job_id("40,123"), "40123");
/// assert_eq!(canonical_job_id("40123.0"), "40123");
/// assert_eq!(canonical_job_id("JOB-7"), "JOB-7");
/// ```
pub fn canonical_job_id(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '\'') && !c.is_whitespace())
        .collect();
    match stripped.strip_suffix(".0") {
        Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            digits.to_string()
        }
        _ => stripped,
    }
}

/// Removes artifact index columns.
pub fn drop_unnamed_columns(df: &DataFrame) -> Result<DataFrame> {
    let keep: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !is_unnamed_column(name.as_str()))
        .map(|name| name.to_string())
        .collect();
    if keep.len() == df.width() {
        return Ok(df.clone());
    }
    debug!(dropped = df.width() - keep.len(), "dropped unnamed columns");
    Ok(df.select(keep)?)
}

/// Casts every column to text.
fn stringify_columns(df: &DataFrame) -> Result<DataFrame> {
    let mut converted: Vec<Column> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        converted.push(column.cast(&DataType::String)?);
    }
    Ok(DataFrame::new(converted)?)
}

/// Key column followed by the other required columns.
fn required_columns(key: &str) -> Vec<&str> {
    std::iter::once(key)
        .chain(
            columns::REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|name| *name != columns::JOB_ID && *name != key),
        )
        .collect()
}

fn check_required(source: &SourceFrame, key: &str) -> Result<()> {
    for column in required_columns(key) {
        if !has_column(&source.frame, column) {
            return Err(IngestError::schema_mismatch(&source.name, column));
        }
    }
    Ok(())
}

/// Cleans one source: artifact columns removed, everything as text.
fn prepare(source: &SourceFrame) -> Result<DataFrame> {
    let cleaned = drop_unnamed_columns(&source.frame)?;
    stringify_columns(&cleaned)
}

/// Stacks the sources in order and keeps the first row per canonical key.
///
/// Columns are unioned across sources in first-seen order; a source without
/// a column contributes nulls. Rows with an empty key are dropped.
pub fn merge_sources(sources: &[SourceFrame], key: &str) -> Result<DataFrame> {
    if sources.is_empty() {
        return Ok(DataFrame::empty());
    }

    let mut prepared = Vec::with_capacity(sources.len());
    for source in sources {
        check_required(source, key)?;
        prepared.push(prepare(source)?);
    }

    let mut union: Vec<String> = Vec::new();
    for df in &prepared {
        for name in df.get_column_names() {
            if !union.iter().any(|existing| existing == name.as_str()) {
                union.push(name.to_string());
            }
        }
    }

    let mut stacked: Option<DataFrame> = None;
    for (source, df) in sources.iter().zip(prepared) {
        let aligned = align_columns(df, &union)?;
        debug!(source = %source.name, rows = aligned.height(), "stacking source");
        match stacked.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&aligned)?;
            }
            None => stacked = Some(aligned),
        }
    }

    let merged = stacked.unwrap_or_else(DataFrame::empty);
    dedupe_by_key(&merged, key)
}

/// Adds null text columns for names the frame lacks and orders columns as `names`.
fn align_columns(mut df: DataFrame, names: &[String]) -> Result<DataFrame> {
    let height = df.height();
    for name in names {
        if !has_column(&df, name) {
            let nulls = Column::full_null(name.as_str().into(), height, &DataType::String);
            df.with_column(nulls)?;
        }
    }
    Ok(df.select(names.iter().cloned())?)
}

/// Keeps the first row per canonical key and writes the canonical key back.
fn dedupe_by_key(df: &DataFrame, key: &str) -> Result<DataFrame> {
    let raw_keys = column_optional_values(df, key)
        .ok_or_else(|| IngestError::schema_mismatch("merged", key))?;

    let mut seen: HashSet<String> = HashSet::with_capacity(raw_keys.len());
    let mut mask = Vec::with_capacity(raw_keys.len());
    let mut kept_keys: Vec<String> = Vec::with_capacity(raw_keys.len());
    let mut empty = 0usize;
    let mut duplicates = 0usize;

    for raw in &raw_keys {
        let canonical = raw.as_deref().map(canonical_job_id).unwrap_or_default();
        if canonical.is_empty() {
            empty += 1;
            mask.push(false);
        } else if seen.insert(canonical.clone()) {
            kept_keys.push(canonical);
            mask.push(true);
        } else {
            duplicates += 1;
            mask.push(false);
        }
    }

    if empty > 0 {
        warn!(rows = empty, key, "dropped rows with an empty key");
    }
    debug!(
        duplicates,
        kept = kept_keys.len(),
        "de-duplicated merged rows"
    );

    let mask = BooleanChunked::from_slice("dedupe".into(), &mask);
    let mut deduped = df.filter(&mask)?;
    deduped.with_column(Series::new(key.into(), kept_keys).into_column())?;
    Ok(deduped)
}

/// Appends the secondary's enrichment columns to the primary by key.
///
/// Every non-key secondary column the primary lacks is added; unmatched rows
/// get null. The primary's row count and order are unchanged. When the
/// secondary repeats a key, the first occurrence wins.
pub fn left_join(primary: &DataFrame, secondary: &SourceFrame, key: &str) -> Result<DataFrame> {
    if !has_column(&secondary.frame, key) {
        return Err(IngestError::schema_mismatch(&secondary.name, key));
    }
    let primary_keys = column_optional_values(primary, key)
        .ok_or_else(|| IngestError::schema_mismatch("merged", key))?;
    let secondary_df = prepare(secondary)?;
    let secondary_keys = column_optional_values(&secondary_df, key).unwrap_or_default();

    let mut index: HashMap<String, usize> = HashMap::with_capacity(secondary_keys.len());
    let mut duplicates = 0usize;
    for (row, raw) in secondary_keys.iter().enumerate() {
        let Some(raw) = raw else { continue };
        let canonical = canonical_job_id(raw);
        if index.contains_key(&canonical) {
            duplicates += 1;
        } else {
            index.insert(canonical, row);
        }
    }
    if duplicates > 0 {
        warn!(
            source = %secondary.name,
            duplicates,
            "enrichment source repeats keys; keeping the first occurrence"
        );
    }

    let rows: Vec<Option<usize>> = primary_keys
        .iter()
        .map(|raw| {
            raw.as_deref()
                .and_then(|raw| index.get(&canonical_job_id(raw)).copied())
        })
        .collect();

    let mut joined = primary.clone();
    let mut added = 0usize;
    for name in secondary_df.get_column_names() {
        let name = name.as_str();
        if name == key || has_column(primary, name) {
            continue;
        }
        let values = column_optional_values(&secondary_df, name).unwrap_or_default();
        let column: Vec<Option<String>> = rows
            .iter()
            .map(|row| row.and_then(|row| values.get(row).cloned().flatten()))
            .collect();
        joined.with_column(Series::new(name.into(), column).into_column())?;
        added += 1;
    }

    let matched = rows.iter().filter(|row| row.is_some()).count();
    debug!(
        source = %secondary.name,
        matched,
        unmatched = rows.len() - matched,
        columns_added = added,
        "joined enrichment source"
    );
    Ok(joined)
}
