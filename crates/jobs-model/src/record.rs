use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One job posting after merge and normalization.
///
/// Derived fields are `None` when the source text could not be parsed; the
/// record itself is always kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobRecord {
    /// Canonical identifier, unique within a [`crate::JobTable`].
    pub job_id: String,
    pub job_title: String,
    pub organization: String,
    pub location: String,
    pub division: Option<String>,
    pub address: Option<String>,
    pub job_code: Option<String>,
    /// Salary text exactly as the source published it.
    pub salary_raw: String,
    /// Annualized lower bound.
    pub salary_min: Option<f64>,
    /// Annualized upper bound.
    pub salary_max: Option<f64>,
    pub closing_date_raw: String,
    pub closing_date: Option<NaiveDate>,
    pub link: Option<String>,
}

impl JobRecord {
    /// True when both bounds parsed but the lower exceeds the upper.
    pub fn has_inverted_salary(&self) -> bool {
        matches!((self.salary_min, self.salary_max), (Some(min), Some(max)) if min > max)
    }

    pub fn closing_year(&self) -> Option<i32> {
        self.closing_date.map(|date| date.year())
    }
}
