//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Local::now().year())
}

/// Formats a `YYYY-MM-DD` date as `M월 D일`.
///
/// Usage in templates: `{{ holiday.date|korean_date }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn korean_date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(chrono::NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_or(raw, |date| date.format("%-m월 %-d일").to_string()))
}
