//! Turning the merged text frame into typed [`JobRecord`]s.
//!
//! Each row is normalized independently. Fields that fail to parse become
//! `None`; a row is never dropped here.

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, warn};

use jobs_common::column_optional_values;
use jobs_model::{JobRecord, JobTable, PipelineConfig, columns};

use crate::datetime::parse_closing_date;
use crate::merge::canonical_job_id;
use crate::salary::parse_salary_range;

/// Data-quality counters gathered while normalizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub rows: usize,
    /// Rows whose salary text produced no bounds.
    pub salary_unparsed: usize,
    /// Rows whose closing-date text produced no date.
    pub date_unparsed: usize,
    /// Rows whose parsed minimum exceeds the maximum.
    pub inverted_ranges: usize,
}

impl NormalizeReport {
    pub fn has_warnings(&self) -> bool {
        self.salary_unparsed > 0 || self.date_unparsed > 0 || self.inverted_ranges > 0
    }
}

/// Column values by row, with missing columns read as all-null.
struct RowSource {
    height: usize,
    values: Vec<Option<Vec<Option<String>>>>,
}

impl RowSource {
    fn new(df: &DataFrame, names: &[&str]) -> Self {
        Self {
            height: df.height(),
            values: names
                .iter()
                .map(|name| column_optional_values(df, name))
                .collect(),
        }
    }

    fn get(&self, column: usize, row: usize) -> Option<String> {
        self.values
            .get(column)
            .and_then(|values| values.as_ref())
            .and_then(|values| values.get(row).cloned().flatten())
    }
}

const ID: usize = 0;
const TITLE: usize = 1;
const ORGANIZATION: usize = 2;
const LOCATION: usize = 3;
const SALARY: usize = 4;
const CLOSING_DATE: usize = 5;
const DIVISION: usize = 6;
const ADDRESS: usize = 7;
const JOB_CODE: usize = 8;

/// Builds the normalized table from a merged frame.
pub fn normalize_frame(df: &DataFrame, config: &PipelineConfig) -> (JobTable, NormalizeReport) {
    let source = RowSource::new(
        df,
        &[
            config.key_column.as_str(),
            columns::JOB_TITLE,
            columns::ORGANIZATION,
            columns::LOCATION,
            columns::SALARY,
            columns::CLOSING_DATE,
            columns::DIVISION,
            columns::ADDRESS,
            columns::JOB_CODE,
        ],
    );

    let mut report = NormalizeReport {
        rows: source.height,
        ..NormalizeReport::default()
    };
    let mut records = Vec::with_capacity(source.height);

    for row in 0..source.height {
        let job_id = canonical_job_id(&source.get(ID, row).unwrap_or_default());
        let salary_raw = source.get(SALARY, row).unwrap_or_default();
        let closing_date_raw = source.get(CLOSING_DATE, row).unwrap_or_default();

        let (salary_min, salary_max) = parse_salary_range(Some(salary_raw.as_str()));
        let closing_date = parse_closing_date(&closing_date_raw, &config.timezone_tokens);

        let record = JobRecord {
            link: config.link_for(&job_id),
            job_id,
            job_title: source.get(TITLE, row).unwrap_or_default(),
            organization: source.get(ORGANIZATION, row).unwrap_or_default(),
            location: source.get(LOCATION, row).unwrap_or_default(),
            division: source.get(DIVISION, row),
            address: source.get(ADDRESS, row),
            job_code: source.get(JOB_CODE, row),
            salary_raw,
            salary_min,
            salary_max,
            closing_date_raw,
            closing_date,
        };

        if record.salary_min.is_none() && record.salary_max.is_none() {
            report.salary_unparsed += 1;
        }
        if record.closing_date.is_none() {
            report.date_unparsed += 1;
        }
        if record.has_inverted_salary() {
            report.inverted_ranges += 1;
            warn!(
                job_id = %record.job_id,
                salary = %record.salary_raw,
                "salary minimum exceeds maximum"
            );
        }
        records.push(record);
    }

    debug!(
        rows = report.rows,
        salary_unparsed = report.salary_unparsed,
        date_unparsed = report.date_unparsed,
        inverted_ranges = report.inverted_ranges,
        "normalized rows"
    );
    (JobTable::new(records), report)
}
