//! Source column names.
//!
//! Snapshot files use human-readable headers; these are the names the
//! merger and normalizer look for.

pub const JOB_ID: &str = "Job ID";
pub const JOB_TITLE: &str = "Job Title";
pub const ORGANIZATION: &str = "Organization";
pub const LOCATION: &str = "Location";
pub const SALARY: &str = "Salary";
pub const CLOSING_DATE: &str = "Closing Date";

// Extended source
pub const DIVISION: &str = "Division";
pub const ADDRESS: &str = "Address";
pub const JOB_CODE: &str = "Job Code";

// Derived
pub const SALARY_MIN: &str = "Salary Min";
pub const SALARY_MAX: &str = "Salary Max";
pub const LINK: &str = "Link";

/// Columns every snapshot source must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    JOB_ID,
    JOB_TITLE,
    ORGANIZATION,
    LOCATION,
    SALARY,
    CLOSING_DATE,
];
