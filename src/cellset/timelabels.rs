//! Time label post-processing
//!
//! Time axes label each interval by its start instant, e.g.
//! `2022-01-01T00:00:00.000Z - [0]` for fiscal year 2022. For yearly
//! reports the year-end date reads better: `2022-12-31T00:00:00.000Z - [0]`.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::record::{Scalar, TabularRecord};

/// Column carrying interval labels on time axes
pub const DATE_IN_RANGE_COLUMN: &str = "DateInRange";

fn label_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})T.*?(\[.*?\])").ok())
        .as_ref()
}

fn time_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"T([\d:.]+Z)").ok())
        .as_ref()
}

/// Rewrites an interval-start label to the last day of its year.
///
/// Labels that do not look like `YYYY-MM-DDT... [n]` are returned unchanged.
pub fn year_end_label(label: &str) -> String {
    let Some(caps) = label_pattern().and_then(|re| re.captures(label)) else {
        return label.to_string();
    };

    let Ok(start) = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") else {
        return label.to_string();
    };
    let Some(year_end) = NaiveDate::from_ymd_opt(start.year(), 12, 31) else {
        return label.to_string();
    };

    let time = time_pattern()
        .and_then(|re| re.captures(label))
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "00:00:00.000Z".to_string());

    format!("{}T{} - {}", year_end.format("%Y-%m-%d"), time, &caps[2])
}

/// Applies `year_end_label` to the `DateInRange` column of every record.
pub fn to_year_end(records: Vec<TabularRecord>) -> Vec<TabularRecord> {
    records
        .into_iter()
        .map(|record| {
            record.map_column(DATE_IN_RANGE_COLUMN, |value| match value {
                Scalar::Text(label) => Scalar::Text(year_end_label(label)),
                other => other.clone(),
            })
        })
        .collect()
}
