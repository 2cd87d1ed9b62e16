//! The user's filter selections and how they apply to a table.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use jobs_model::{JobRecord, JobTable};
use jobs_transform::{CpiTable, adjust_table};

use crate::engine::matches_chain;
use crate::error::FilterError;
use crate::predicate::{ChainLink, Choice, NumericField, Predicate, TextField};

/// Default title marker for restricted (TDA) postings.
pub const DEFAULT_RESTRICTED_MARKER: &str = "TDA";

/// What to do with postings whose title carries the restricted marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictedMode {
    #[default]
    Include,
    Exclude,
    Only,
}

impl RestrictedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestrictedMode::Include => "include",
            RestrictedMode::Exclude => "exclude",
            RestrictedMode::Only => "only",
        }
    }

    fn admits(self, restricted: bool) -> bool {
        match self {
            RestrictedMode::Include => true,
            RestrictedMode::Exclude => !restricted,
            RestrictedMode::Only => restricted,
        }
    }
}

impl fmt::Display for RestrictedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestrictedMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(RestrictedMode::Include),
            "exclude" => Ok(RestrictedMode::Exclude),
            "only" => Ok(RestrictedMode::Only),
            other => Err(FilterError::UnknownRestrictedMode(other.to_string())),
        }
    }
}

/// Everything a user can select, in one bundle.
///
/// Fixed selections are ANDed together and with the text chain. Unset
/// selections pass every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Lowest acceptable salary; a posting passes when its minimum is at least this.
    pub salary_low: Option<f64>,
    /// Highest acceptable salary; a posting passes when its maximum is at most this.
    pub salary_high: Option<f64>,
    pub organization: Choice,
    /// Multi-select; empty passes every row.
    pub organizations: Vec<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub closing_from: Option<NaiveDate>,
    pub closing_to: Option<NaiveDate>,
    pub restricted: RestrictedMode,
    /// Case-sensitive title marker for restricted postings.
    pub restricted_marker: String,
    pub chain: Vec<ChainLink>,
    /// Restate salaries in latest-year prices after filtering.
    pub adjust_for_inflation: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            salary_low: None,
            salary_high: None,
            organization: Choice::All,
            organizations: Vec::new(),
            title: None,
            location: None,
            closing_from: None,
            closing_to: None,
            restricted: RestrictedMode::Include,
            restricted_marker: DEFAULT_RESTRICTED_MARKER.to_string(),
            chain: Vec::new(),
            adjust_for_inflation: false,
        }
    }
}

impl FilterParams {
    /// The fixed selections as predicates, all of which must hold.
    pub fn fixed_predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if self.salary_low.is_some() {
            predicates.push(Predicate::NumericRange {
                field: NumericField::SalaryMin,
                min: self.salary_low,
                max: None,
            });
        }
        if self.salary_high.is_some() {
            predicates.push(Predicate::NumericRange {
                field: NumericField::SalaryMax,
                min: None,
                max: self.salary_high,
            });
        }
        if self.organization != Choice::All {
            predicates.push(Predicate::Equals {
                field: TextField::Organization,
                choice: self.organization.clone(),
            });
        }
        if !self.organizations.is_empty() {
            predicates.push(Predicate::OneOf {
                field: TextField::Organization,
                values: self.organizations.clone(),
            });
        }
        if let Some(title) = non_blank(self.title.as_deref()) {
            predicates.push(Predicate::contains(TextField::Title, title));
        }
        if let Some(location) = non_blank(self.location.as_deref()) {
            predicates.push(Predicate::contains(TextField::Location, location));
        }
        if self.closing_from.is_some() || self.closing_to.is_some() {
            predicates.push(Predicate::DateRange {
                from: self.closing_from,
                to: self.closing_to,
            });
        }
        predicates
    }

    pub fn is_restricted(&self, record: &JobRecord) -> bool {
        !self.restricted_marker.is_empty() && record.job_title.contains(&self.restricted_marker)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Applies every selection in `params` and, when requested, inflation adjustment.
///
/// `current_year` is the year treated as the present by the CPI adjustment.
pub fn apply_filters(
    table: &JobTable,
    params: &FilterParams,
    cpi: &CpiTable,
    current_year: i32,
) -> JobTable {
    let fixed = params.fixed_predicates();
    let mask: Vec<bool> = table
        .iter()
        .map(|record| {
            fixed.iter().all(|p| p.matches(record))
                && params.restricted.admits(params.is_restricted(record))
                && matches_chain(record, &params.chain)
        })
        .collect();
    let selected = table.select(&mask);
    debug!(
        fixed = fixed.len(),
        links = params.chain.len(),
        restricted = %params.restricted,
        rows_in = table.len(),
        rows_out = selected.len(),
        "applied filters"
    );

    if params.adjust_for_inflation {
        adjust_table(&selected, cpi, current_year)
    } else {
        selected
    }
}
