//! Aggregates behind the summary view.

use std::collections::BTreeMap;

use serde::Serialize;

use jobs_model::JobTable;

/// Row count, salary extents, and postings per organization.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    /// Lowest and highest parsed salary minimum.
    pub salary_min_range: Option<(f64, f64)>,
    /// Lowest and highest parsed salary maximum.
    pub salary_max_range: Option<(f64, f64)>,
    /// Most postings first, ties by name.
    pub by_organization: Vec<(String, usize)>,
    pub undated: usize,
}

impl TableSummary {
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

pub fn summarize(table: &JobTable) -> TableSummary {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in table {
        *counts.entry(record.organization.as_str()).or_default() += 1;
    }
    let mut by_organization: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    by_organization.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    TableSummary {
        rows: table.len(),
        salary_min_range: extent(table.iter().filter_map(|r| r.salary_min)),
        salary_max_range: extent(table.iter().filter_map(|r| r.salary_max)),
        by_organization,
        undated: table.iter().filter(|r| r.closing_date.is_none()).count(),
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
