//! Display formatting shared by the renderers.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Shown in place of a missing value on cards.
pub const PLACEHOLDER: &str = "--";
/// Shown in place of a missing value in table cells.
pub const CELL_PLACEHOLDER: &str = "-";

/// Value as text, or `placeholder` when absent.
pub fn or_placeholder<T: Display>(value: Option<T>, placeholder: &str) -> String {
    match value {
        Some(v) => v.to_string(),
        None => placeholder.to_string(),
    }
}

/// Number with an explicit `+` when non-negative (`+1.5`, `-0.3`).
pub fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

pub fn percent(value: f64) -> String {
    format!("{}%", value)
}

pub fn signed_percent(value: f64) -> String {
    format!("{}%", signed(value))
}

pub fn dollars(value: f64) -> String {
    format!("${}", value)
}

/// `↑` for non-negative changes, `↓` otherwise.
pub fn arrow(value: f64) -> &'static str {
    if value >= 0.0 {
        "↑"
    } else {
        "↓"
    }
}

/// Parse the date formats the API uses: `2024-01-05`, RFC 3339, or a naive
/// `2024-01-05T00:00:00[.fff]` timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// US short date, e.g. `Jan 5, 2025`.
pub fn us_short_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%b %-d, %Y").to_string())
}

/// British long date, e.g. `05 January 2025`.
pub fn gb_long_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%d %B %Y").to_string())
}
