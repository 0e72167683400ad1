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

/// Formats a `YYYY-MM-DD` date with its weekday, e.g. `2025-12-25 (목)`.
///
/// Usage in templates: `{{ holiday.date|date_with_weekday }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn date_with_weekday(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    use chrono::Datelike;

    const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];
    let raw = value.to_string();
    Ok(match chrono::NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => {
            let index = date.weekday().num_days_from_sunday() as usize;
            WEEKDAYS
                .get(index)
                .map_or(raw.clone(), |day| format!("{raw} ({day})"))
        }
        Err(_) => raw,
    })
}
