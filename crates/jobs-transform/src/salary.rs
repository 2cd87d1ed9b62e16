//! Salary text parsing.
//!
//! Postings publish pay as free text such as `"$80,000 - $100,000 Per Year"`
//! or `"$40.00 Per Hour (MplusM)"`. This module turns that text into an
//! annualized number for one end of the range.

use jobs_model::{PayPeriod, SalaryBound};

/// Compensation-plan annotation appended to some salary strings.
pub const PLAN_ANNOTATION: &str = " (MplusM)";

/// Hours in the standard work week used to annualize hourly pay.
///
/// This is a policy, not a fact about any individual posting: hourly rates
/// are assumed to be paid for a 36.25-hour week.
pub const STANDARD_HOURS_PER_WEEK: f64 = 36.25;

pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

const RANGE_SEPARATOR: &str = " - ";
const PERIOD_TOKEN: &str = " Per";

/// Detects the pay period by case-insensitive keyword, yearly first.
///
/// ```
/// use jobs_model::PayPeriod;
/// use jobs_transform::salary::detect_pay_period;
///
/// assert_eq!(detect_pay_period("$5,000 Per Month"), Some(PayPeriod::Month));
/// assert_eq!(detect_pay_period("$90,000 per annum"), Some(PayPeriod::Year));
/// assert_eq!(detect_pay_period("negotiable"), None);
/// ```
pub fn detect_pay_period(raw: &str) -> Option<PayPeriod> {
    let lower = raw.to_lowercase();
    if lower.contains("per year") || lower.contains("per annum") {
        Some(PayPeriod::Year)
    } else if lower.contains("per month") {
        Some(PayPeriod::Month)
    } else if lower.contains("per week") {
        Some(PayPeriod::Week)
    } else if lower.contains("per hour") {
        Some(PayPeriod::Hour)
    } else {
        None
    }
}

/// Annualizes an amount paid per `period`.
pub fn annualize(amount: f64, period: PayPeriod) -> f64 {
    match period {
        PayPeriod::Year => amount,
        PayPeriod::Month => amount * MONTHS_PER_YEAR,
        PayPeriod::Week => amount * WEEKS_PER_YEAR,
        PayPeriod::Hour => amount * STANDARD_HOURS_PER_WEEK * WEEKS_PER_YEAR,
    }
}

/// Parses one bound of a salary string into an annual amount.
///
/// Returns `None` for missing input, a non-numeric amount for the requested
/// bound, or text without a recognized pay period. A single amount (no `" - "`)
/// serves as both bounds.
///
/// ```
/// use jobs_model::SalaryBound;
/// use jobs_transform::salary::parse_salary;
///
/// let raw = Some("$80,000 - $100,000 Per Year");
/// assert_eq!(parse_salary(raw, SalaryBound::Min), Some(80000.0));
/// assert_eq!(parse_salary(raw, SalaryBound::Max), Some(100000.0));
/// assert_eq!(parse_salary(Some("garbage text"), SalaryBound::Min), None);
/// ```
pub fn parse_salary(raw: Option<&str>, bound: SalaryBound) -> Option<f64> {
    let raw = raw?;
    let period = detect_pay_period(raw)?;
    let amount = parse_amount(bound_token(raw, bound)?.trim())?;
    Some(annualize(amount, period))
}

/// Parses both bounds at once.
pub fn parse_salary_range(raw: Option<&str>) -> (Option<f64>, Option<f64>) {
    (
        parse_salary(raw, SalaryBound::Min),
        parse_salary(raw, SalaryBound::Max),
    )
}

/// Picks the unparsed amount for `bound` from the text left of the pay period.
///
/// Only the selected token is parsed, so a bad upper bound leaves the lower
/// bound intact.
fn bound_token(raw: &str, bound: SalaryBound) -> Option<String> {
    let text = raw.replace(PLAN_ANNOTATION, "");
    let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
    let (range, _) = cleaned.split_once(PERIOD_TOKEN)?;
    let parts: Vec<&str> = range.split(RANGE_SEPARATOR).collect();
    let token = match (parts.as_slice(), bound) {
        ([single], _) => single,
        ([low, ..], SalaryBound::Min) => low,
        ([_, high, ..], SalaryBound::Max) => high,
        _ => return None,
    };
    Some((*token).to_string())
}

fn parse_amount(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
