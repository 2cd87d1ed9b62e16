//! Closing-date parsing.
//!
//! Postings publish closing dates as text like
//! `"Friday, June 14, 2024 11:59 pm EDT"`. Only the calendar date matters
//! downstream; the time of day and timezone are discarded.

use chrono::NaiveDate;

/// Long form with weekday, e.g. `Friday, June 14, 2024`. Chrono rejects a
/// weekday that contradicts the date.
const WEEKDAY_FORMAT: &str = "%A, %B %d, %Y";
const MONTH_NAME_FORMAT: &str = "%B %d, %Y";
const ISO_FORMAT: &str = "%Y-%m-%d";
const US_NUMERIC_FORMAT: &str = "%m/%d/%Y";

/// Parses the leading calendar date of a closing-date string.
///
/// Tokens listed in `timezone_tokens` are removed first (exact, whole-token
/// matches). Returns `None` for blank or unparseable text.
///
/// ```
/// use chrono::NaiveDate;
/// use jobs_transform::datetime::parse_closing_date;
///
/// let tz = ["EDT".to_string()];
/// assert_eq!(
///     parse_closing_date("Friday, June 14, 2024 11:59 pm EDT", &tz),
///     NaiveDate::from_ymd_opt(2024, 6, 14)
/// );
/// assert_eq!(parse_closing_date("2024-06-14T23:59:00", &tz), NaiveDate::from_ymd_opt(2024, 6, 14));
/// assert_eq!(parse_closing_date("soon", &tz), None);
/// ```
pub fn parse_closing_date(raw: &str, timezone_tokens: &[String]) -> Option<NaiveDate> {
    let tokens: Vec<&str> = raw
        .split_whitespace()
        .filter(|token| !is_timezone_token(token, timezone_tokens))
        .collect();
    if tokens.is_empty() {
        return None;
    }

    if tokens.len() >= 4
        && let Some(date) = parse_prefix(&tokens[..4], WEEKDAY_FORMAT)
    {
        return Some(date);
    }
    if tokens.len() >= 3
        && let Some(date) = parse_prefix(&tokens[..3], MONTH_NAME_FORMAT)
    {
        return Some(date);
    }

    let first = tokens[0].split('T').next().unwrap_or(tokens[0]);
    [ISO_FORMAT, US_NUMERIC_FORMAT]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(first.trim_end_matches(','), format).ok())
}

fn parse_prefix(tokens: &[&str], format: &str) -> Option<NaiveDate> {
    let candidate = tokens.join(" ");
    NaiveDate::parse_from_str(candidate.trim_end_matches([',', '.']), format).ok()
}

fn is_timezone_token(token: &str, timezone_tokens: &[String]) -> bool {
    let bare = token.trim_matches(|c: char| c == '(' || c == ')' || c == ',');
    timezone_tokens.iter().any(|tz| tz == bare)
}
