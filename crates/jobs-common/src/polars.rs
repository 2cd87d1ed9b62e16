//! Polars value and column helpers.
//!
//! Source snapshots arrive with whatever dtypes the reader inferred (a Parquet
//! snapshot may carry `Job ID` as an integer, a CSV snapshot as text). These
//! helpers give the rest of the pipeline one string view over any cell.

use polars::prelude::{AnyValue, DataFrame};

/// Converts a Polars `AnyValue` to its display text.
///
/// `Null` becomes an empty string and floats lose trailing zeros, so an id
/// stored as `12345.0` reads back as `12345`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use jobs_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int64(40123)), "40123");
/// assert_eq!(any_to_string(AnyValue::Float64(40123.0)), "40123");
/// assert_eq!(any_to_string(AnyValue::String("Analyst")), "Analyst");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Converts `AnyValue` to `String`, returning `None` for null or blank cells.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    if s.trim().is_empty() { None } else { Some(s) }
}

/// Formats a float without trailing zeros after the decimal point.
///
/// ```
/// use jobs_common::format_numeric;
///
/// assert_eq!(format_numeric(80000.0), "80000");
/// assert_eq!(format_numeric(40.50), "40.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Returns true if the frame has a column with exactly this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Collects a column as optional strings, trimming each value.
///
/// Blank cells become `None`. Returns `None` when the column does not exist.
pub fn column_optional_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null))
            .map(|v| v.trim().to_string());
        values.push(value);
    }
    Some(values)
}
