//! Predicates over a single [`JobRecord`] and the links that chain them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use jobs_model::JobRecord;

use crate::error::FilterError;

/// How a chain link combines with everything before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    And,
    Or,
    /// `acc & !p`
    Not,
}

impl Combinator {
    /// Folds a link's result into the running value.
    pub fn apply(self, acc: bool, value: bool) -> bool {
        match self {
            Combinator::And => acc && value,
            Combinator::Or => acc || value,
            Combinator::Not => acc && !value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
            Combinator::Not => "not",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Combinator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "&" => Ok(Combinator::And),
            "or" | "|" => Ok(Combinator::Or),
            "not" | "and not" | "!" => Ok(Combinator::Not),
            other => Err(FilterError::UnknownCombinator(other.to_string())),
        }
    }
}

/// Text columns a predicate can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    JobId,
    Title,
    Organization,
    Location,
    Division,
    Address,
    JobCode,
}

impl TextField {
    /// The record's value for this field; `None` when the record lacks it.
    pub fn value<'a>(&self, record: &'a JobRecord) -> Option<&'a str> {
        match self {
            TextField::JobId => Some(record.job_id.as_str()),
            TextField::Title => Some(record.job_title.as_str()),
            TextField::Organization => Some(record.organization.as_str()),
            TextField::Location => Some(record.location.as_str()),
            TextField::Division => record.division.as_deref(),
            TextField::Address => record.address.as_deref(),
            TextField::JobCode => record.job_code.as_deref(),
        }
    }
}

impl FromStr for TextField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();
        match normalized.as_str() {
            "id" | "jobid" => Ok(TextField::JobId),
            "title" | "jobtitle" => Ok(TextField::Title),
            "organization" | "org" | "ministry" => Ok(TextField::Organization),
            "location" | "city" => Ok(TextField::Location),
            "division" => Ok(TextField::Division),
            "address" => Ok(TextField::Address),
            "code" | "jobcode" => Ok(TextField::JobCode),
            _ => Err(FilterError::UnknownField(s.trim().to_string())),
        }
    }
}

/// Numeric columns a predicate can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    SalaryMin,
    SalaryMax,
}

impl NumericField {
    pub fn value(&self, record: &JobRecord) -> Option<f64> {
        match self {
            NumericField::SalaryMin => record.salary_min,
            NumericField::SalaryMax => record.salary_max,
        }
    }
}

/// A single-select input: everything, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Choice {
    #[default]
    All,
    Value(String),
}

impl Choice {
    /// `"All"` (any case) or blank selects everything.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Choice::All
        } else {
            Choice::Value(trimmed.to_string())
        }
    }
}

/// A boolean test over one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Inclusive range; an absent bound is open. Null values fail.
    NumericRange {
        field: NumericField,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Inclusive closing-date window. Undated records fail.
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    /// Case-insensitive substring match. Null is false.
    Contains { field: TextField, needle: String },
    /// Exact match, or every row for [`Choice::All`].
    Equals { field: TextField, choice: Choice },
    /// Exact match against any of `values`; an empty selection passes every row.
    OneOf {
        field: TextField,
        values: Vec<String>,
    },
}

impl Predicate {
    pub fn contains(field: TextField, needle: impl Into<String>) -> Self {
        Predicate::Contains {
            field,
            needle: needle.into(),
        }
    }

    pub fn matches(&self, record: &JobRecord) -> bool {
        match self {
            Predicate::NumericRange { field, min, max } => {
                field.value(record).is_some_and(|value| {
                    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
                })
            }
            Predicate::DateRange { from, to } => record.closing_date.is_some_and(|date| {
                from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
            }),
            Predicate::Contains { field, needle } => {
                let needle = needle.to_lowercase();
                field
                    .value(record)
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            }
            Predicate::Equals { field, choice } => match choice {
                Choice::All => true,
                Choice::Value(expected) => field.value(record) == Some(expected.as_str()),
            },
            Predicate::OneOf { field, values } => {
                values.is_empty()
                    || field
                        .value(record)
                        .is_some_and(|value| values.iter().any(|v| v == value))
            }
        }
    }
}

/// One step of a filter chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    pub combinator: Combinator,
    pub predicate: Predicate,
}

impl ChainLink {
    pub fn new(combinator: Combinator, predicate: Predicate) -> Self {
        Self {
            combinator,
            predicate,
        }
    }
}

impl FromStr for ChainLink {
    type Err = FilterError;

    /// Parses `combinator:field:needle`, e.g. `or:title:analyst`.
    ///
    /// The needle may itself contain `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(combinator), Some(field), Some(needle)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(FilterError::MalformedLink(s.to_string()));
        };
        let needle = needle.trim();
        if needle.is_empty() {
            return Err(FilterError::MalformedLink(s.to_string()));
        }
        Ok(ChainLink::new(
            combinator.parse()?,
            Predicate::contains(field.parse()?, needle),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> JobRecord {
        JobRecord {
            job_id: "40123".into(),
            job_title: "Senior Policy Analyst".into(),
            organization: "Ministry of Health".into(),
            location: "Toronto".into(),
            salary_min: Some(80_000.0),
            salary_max: Some(100_000.0),
            closing_date: NaiveDate::from_ymd_opt(2024, 6, 14),
            ..JobRecord::default()
        }
    }

    #[test]
    fn numeric_range_is_inclusive() {
        let p = Predicate::NumericRange {
            field: NumericField::SalaryMin,
            min: Some(80_000.0),
            max: Some(80_000.0),
        };
        assert!(p.matches(&record()));
        let open = Predicate::NumericRange {
            field: NumericField::SalaryMax,
            min: None,
            max: None,
        };
        assert!(open.matches(&record()));
        assert!(!open.matches(&JobRecord::default()));
    }

    #[test]
    fn date_range_rejects_undated() {
        let p = Predicate::DateRange {
            from: NaiveDate::from_ymd_opt(2024, 6, 14),
            to: NaiveDate::from_ymd_opt(2024, 6, 30),
        };
        assert!(p.matches(&record()));
        assert!(!p.matches(&JobRecord::default()));
    }

    #[test]
    fn contains_is_case_insensitive_and_null_false() {
        assert!(Predicate::contains(TextField::Title, "ANALYST").matches(&record()));
        assert!(!Predicate::contains(TextField::Division, "x").matches(&record()));
    }

    #[test]
    fn equals_and_one_of() {
        let all = Predicate::Equals {
            field: TextField::Organization,
            choice: Choice::All,
        };
        assert!(all.matches(&JobRecord::default()));
        let exact = Predicate::Equals {
            field: TextField::Organization,
            choice: Choice::parse("Ministry of Health"),
        };
        assert!(exact.matches(&record()));
        let empty = Predicate::OneOf {
            field: TextField::Location,
            values: Vec::new(),
        };
        assert!(empty.matches(&record()));
        let some = Predicate::OneOf {
            field: TextField::Location,
            values: vec!["Ottawa".into(), "Toronto".into()],
        };
        assert!(some.matches(&record()));
    }

    #[test]
    fn choice_parse() {
        assert_eq!(Choice::parse("All"), Choice::All);
        assert_eq!(Choice::parse("  "), Choice::All);
        assert_eq!(Choice::parse(" Health "), Choice::Value("Health".into()));
    }

    #[test]
    fn chain_link_parsing() {
        let link: ChainLink = "or:title:analyst".parse().unwrap();
        assert_eq!(link.combinator, Combinator::Or);
        assert_eq!(
            link.predicate,
            Predicate::contains(TextField::Title, "analyst")
        );

        let link: ChainLink = "NOT:job code:a:b".parse().unwrap();
        assert_eq!(link.combinator, Combinator::Not);
        assert_eq!(
            link.predicate,
            Predicate::contains(TextField::JobCode, "a:b")
        );

        assert!(matches!(
            "title:analyst".parse::<ChainLink>(),
            Err(FilterError::MalformedLink(_))
        ));
        assert!(matches!(
            "xor:title:analyst".parse::<ChainLink>(),
            Err(FilterError::UnknownCombinator(_))
        ));
        assert!(matches!(
            "and:salary:analyst".parse::<ChainLink>(),
            Err(FilterError::UnknownField(_))
        ));
        assert!(matches!(
            "and:title: ".parse::<ChainLink>(),
            Err(FilterError::MalformedLink(_))
        ));
    }
}
