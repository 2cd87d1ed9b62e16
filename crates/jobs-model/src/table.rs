//! The normalized job table handed to filters and presentation.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::{Deserialize, Serialize};

use crate::columns;
use crate::enums::ColumnKind;
use crate::record::JobRecord;

/// Name and semantic type of one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnMeta {
    fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// An ordered, immutable-by-convention set of normalized postings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTable {
    records: Vec<JobRecord>,
}

impl JobTable {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.records.iter()
    }

    pub fn job_ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.job_id.as_str()).collect()
    }

    /// Keeps the rows whose mask entry is true. Rows past the end of the mask are dropped.
    pub fn select(&self, mask: &[bool]) -> JobTable {
        let records = self
            .records
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(record, _)| record.clone())
            .collect();
        JobTable { records }
    }

    /// Orders by closing date ascending, undated rows last, ties broken by job id.
    pub fn sort_by_closing_date(&mut self) {
        self.records
            .sort_by(|a, b| match (a.closing_date, b.closing_date) {
                (Some(left), Some(right)) => left.cmp(&right).then_with(|| a.job_id.cmp(&b.job_id)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.job_id.cmp(&b.job_id),
            });
    }

    /// Drops postings that closed before `today`. Undated postings stay.
    ///
    /// Returns the number of rows removed.
    pub fn retain_open(&mut self, today: NaiveDate) -> usize {
        let before = self.records.len();
        self.records
            .retain(|r| r.closing_date.is_none_or(|date| date >= today));
        before - self.records.len()
    }

    pub fn has_extended_fields(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.division.is_some() || r.address.is_some() || r.job_code.is_some())
    }

    pub fn has_links(&self) -> bool {
        self.records.iter().any(|r| r.link.is_some())
    }

    /// Column metadata in display order.
    ///
    /// Enrichment and link columns are listed only when at least one row carries them.
    pub fn columns(&self) -> Vec<ColumnMeta> {
        let mut meta = vec![
            ColumnMeta::new(columns::JOB_ID, ColumnKind::String),
            ColumnMeta::new(columns::JOB_TITLE, ColumnKind::String),
            ColumnMeta::new(columns::ORGANIZATION, ColumnKind::String),
            ColumnMeta::new(columns::SALARY_MIN, ColumnKind::Number),
            ColumnMeta::new(columns::SALARY_MAX, ColumnKind::Number),
            ColumnMeta::new(columns::LOCATION, ColumnKind::String),
            ColumnMeta::new(columns::CLOSING_DATE, ColumnKind::Date),
        ];
        if self.has_extended_fields() {
            meta.push(ColumnMeta::new(columns::DIVISION, ColumnKind::String));
            meta.push(ColumnMeta::new(columns::ADDRESS, ColumnKind::String));
            meta.push(ColumnMeta::new(columns::JOB_CODE, ColumnKind::String));
        }
        if self.has_links() {
            meta.push(ColumnMeta::new(columns::LINK, ColumnKind::String));
        }
        meta
    }

    /// Builds a Polars frame with the columns from [`JobTable::columns`].
    ///
    /// Dates are rendered as `YYYY-MM-DD` strings; missing values are null.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut frame_columns: Vec<Column> = Vec::new();
        for meta in self.columns() {
            let name = meta.name.as_str();
            let series = match name {
                columns::SALARY_MIN => self.number_series(name, |r| r.salary_min),
                columns::SALARY_MAX => self.number_series(name, |r| r.salary_max),
                columns::CLOSING_DATE => self.text_series(name, |r| {
                    r.closing_date.map(|d| d.format("%Y-%m-%d").to_string())
                }),
                columns::JOB_ID => self.text_series(name, |r| Some(r.job_id.clone())),
                columns::JOB_TITLE => self.text_series(name, |r| Some(r.job_title.clone())),
                columns::ORGANIZATION => self.text_series(name, |r| Some(r.organization.clone())),
                columns::LOCATION => self.text_series(name, |r| Some(r.location.clone())),
                columns::DIVISION => self.text_series(name, |r| r.division.clone()),
                columns::ADDRESS => self.text_series(name, |r| r.address.clone()),
                columns::JOB_CODE => self.text_series(name, |r| r.job_code.clone()),
                _ => self.text_series(name, |r| r.link.clone()),
            };
            frame_columns.push(series.into_column());
        }
        DataFrame::new(frame_columns)
    }

    fn text_series(&self, name: &str, f: impl Fn(&JobRecord) -> Option<String>) -> Series {
        let values: Vec<Option<String>> = self.records.iter().map(f).collect();
        Series::new(name.into(), values)
    }

    fn number_series(&self, name: &str, f: impl Fn(&JobRecord) -> Option<f64>) -> Series {
        let values: Vec<Option<f64>> = self.records.iter().map(f).collect();
        Series::new(name.into(), values)
    }
}

impl FromIterator<JobRecord> for JobTable {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        JobTable::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a JobTable {
    type Item = &'a JobRecord;
    type IntoIter = std::slice::Iter<'a, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
