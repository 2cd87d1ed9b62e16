//! Inflation adjustment with a fixed consumer price index table.
//!
//! "Today" is always the latest year in the table, never a live index feed.
//! Years the table does not know about pass through unchanged.

use std::collections::BTreeMap;

use chrono::{Datelike, Local};
use tracing::debug;

use jobs_model::{JobRecord, JobTable};

/// Canadian all-items CPI, annual averages (2002 = 100).
const DEFAULT_INDEX: [(i32, f64); 17] = [
    (2008, 114.1),
    (2009, 114.4),
    (2010, 116.5),
    (2011, 119.9),
    (2012, 121.7),
    (2013, 122.8),
    (2014, 125.2),
    (2015, 126.6),
    (2016, 128.4),
    (2017, 130.4),
    (2018, 133.4),
    (2019, 136.0),
    (2020, 137.0),
    (2021, 141.6),
    (2022, 151.2),
    (2023, 157.1),
    (2024, 160.9),
];

/// Year-keyed price index used to restate historical amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct CpiTable {
    index: BTreeMap<i32, f64>,
}

impl Default for CpiTable {
    fn default() -> Self {
        Self::from_entries(DEFAULT_INDEX)
    }
}

impl CpiTable {
    /// Builds a table from `(year, index)` pairs. Non-positive or non-finite
    /// index values are ignored.
    pub fn from_entries(entries: impl IntoIterator<Item = (i32, f64)>) -> Self {
        let index = entries
            .into_iter()
            .filter(|(_, value)| value.is_finite() && *value > 0.0)
            .collect();
        Self { index }
    }

    pub fn index_for(&self, year: i32) -> Option<f64> {
        self.index.get(&year).copied()
    }

    /// Latest year in the table; its index represents present-day prices.
    pub fn latest_year(&self) -> Option<i32> {
        self.index.keys().next_back().copied()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.index.keys().copied()
    }

    /// Restates `amount` from `year` into latest-year prices, treating
    /// `current_year` as the present.
    ///
    /// Unknown years and the current year return `amount` unchanged.
    /// Results are rounded to cents.
    ///
    /// ```
    /// use jobs_transform::cpi::CpiTable;
    ///
    /// let cpi = CpiTable::default();
    /// assert_eq!(cpi.adjust_as_of(100_000.0, 2024, 2024), 100_000.0);
    /// assert_eq!(cpi.adjust_as_of(100_000.0, 1999, 2024), 100_000.0);
    /// assert!(cpi.adjust_as_of(100_000.0, 2020, 2024) > 100_000.0);
    /// ```
    pub fn adjust_as_of(&self, amount: f64, year: i32, current_year: i32) -> f64 {
        if year == current_year {
            return amount;
        }
        let (Some(from), Some(latest)) = (
            self.index_for(year),
            self.latest_year().and_then(|y| self.index_for(y)),
        ) else {
            return amount;
        };
        round_cents(amount * latest / from)
    }

    /// [`CpiTable::adjust_as_of`] using the local calendar year.
    pub fn adjust(&self, amount: f64, year: i32) -> f64 {
        self.adjust_as_of(amount, year, Local::now().year())
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Restates every record's salary bounds from its closing year.
///
/// Records without a closing date keep their nominal salaries.
pub fn adjust_table(table: &JobTable, cpi: &CpiTable, current_year: i32) -> JobTable {
    let mut adjusted = 0usize;
    let records: Vec<JobRecord> = table
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if let Some(year) = record.closing_year() {
                record.salary_min = record
                    .salary_min
                    .map(|v| cpi.adjust_as_of(v, year, current_year));
                record.salary_max = record
                    .salary_max
                    .map(|v| cpi.adjust_as_of(v, year, current_year));
                adjusted += 1;
            }
            record
        })
        .collect();
    debug!(
        rows = records.len(),
        adjusted,
        "applied inflation adjustment"
    );
    JobTable::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn default_table_spans_2008_to_2024() {
        let cpi = CpiTable::default();
        assert_eq!(cpi.years().next(), Some(2008));
        assert_eq!(cpi.latest_year(), Some(2024));
        assert_eq!(cpi.years().count(), 17);
    }

    #[test]
    fn default_index_is_increasing() {
        let cpi = CpiTable::default();
        let values: Vec<f64> = cpi.years().filter_map(|y| cpi.index_for(y)).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn current_year_is_identity() {
        let cpi = CpiTable::default();
        assert_eq!(cpi.adjust_as_of(100_000.0, 2024, 2024), 100_000.0);
        assert_eq!(cpi.adjust_as_of(100_000.0, 2020, 2020), 100_000.0);
    }

    #[test]
    fn unknown_year_is_identity() {
        let cpi = CpiTable::default();
        assert_eq!(cpi.adjust_as_of(100_000.0, 1999, 2026), 100_000.0);
        assert_eq!(cpi.adjust_as_of(100_000.0, 2031, 2026), 100_000.0);
    }

    #[test]
    fn historical_year_rounds_to_cents() {
        let cpi = CpiTable::default();
        let adjusted = cpi.adjust_as_of(100_000.0, 2020, 2026);
        assert!((adjusted - 117_445.26).abs() < 1e-6);
        assert!(adjusted > 100_000.0);
    }

    #[test]
    fn empty_table_degrades_to_identity() {
        let cpi = CpiTable::from_entries([]);
        assert_eq!(cpi.adjust_as_of(55_000.0, 2015, 2026), 55_000.0);
        let invalid = CpiTable::from_entries([(2015, 0.0), (2016, f64::NAN)]);
        assert_eq!(invalid.latest_year(), None);
    }

    #[test]
    fn adjust_table_uses_closing_year() {
        let cpi = CpiTable::from_entries([(2020, 100.0), (2024, 150.0)]);
        let dated = JobRecord {
            job_id: "1".into(),
            salary_min: Some(80_000.0),
            salary_max: Some(100_000.0),
            closing_date: NaiveDate::from_ymd_opt(2020, 5, 1),
            ..JobRecord::default()
        };
        let undated = JobRecord {
            job_id: "2".into(),
            salary_min: Some(80_000.0),
            ..JobRecord::default()
        };
        let table = JobTable::new(vec![dated, undated]);
        let adjusted = adjust_table(&table, &cpi, 2026);
        assert_eq!(adjusted.records()[0].salary_min, Some(120_000.0));
        assert_eq!(adjusted.records()[0].salary_max, Some(150_000.0));
        assert_eq!(adjusted.records()[1].salary_min, Some(80_000.0));
    }
}
