//! Small enumerations shared across the pipeline crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which end of a salary range to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalaryBound {
    Min,
    Max,
}

/// Pay period named in a salary string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayPeriod {
    Year,
    Month,
    Week,
    Hour,
}

impl PayPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayPeriod::Year => "year",
            PayPeriod::Month => "month",
            PayPeriod::Week => "week",
            PayPeriod::Hour => "hour",
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic type of a table column, as reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    String,
    Number,
    Date,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::String => "string",
            ColumnKind::Number => "number",
            ColumnKind::Date => "date",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of a raw source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    #[default]
    Csv,
    Parquet,
}

impl SourceFormat {
    /// Guesses the format from a path or URL extension, ignoring any query string.
    ///
    /// ```
    /// use jobs_model::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::from_location("data/jobs.parquet"), SourceFormat::Parquet);
    /// assert_eq!(SourceFormat::from_location("https://host/jobs.csv?ref=main"), SourceFormat::Csv);
    /// ```
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".parquet") || lower.ends_with(".pq") {
            SourceFormat::Parquet
        } else {
            SourceFormat::Csv
        }
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "parquet" | "pq" => Ok(SourceFormat::Parquet),
            other => Err(format!("unknown source format: {other}")),
        }
    }
}
