//! Month grid for the storefront holiday calendar.
//!
//! Weeks start on Sunday. Cells before the 1st and after the last day of the
//! month are empty.

use chrono::{Datelike, Months, NaiveDate};

use crate::types::holiday::{Holiday, find_holiday};

/// One day in the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    /// Reason of the holiday falling on this day.
    pub holiday: Option<String>,
    pub is_today: bool,
}

/// A calendar month with holidays resolved per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthView {
    /// Build the grid for `year`/`month`.
    ///
    /// Returns `None` for an invalid month.
    #[must_use]
    pub fn build(year: i32, month: u32, holidays: &[Holiday], today: NaiveDate) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = first.checked_add_months(Months::new(1))?;

        let mut weeks = Vec::new();
        let mut week: [Option<DayCell>; 7] = Default::default();
        let mut slot = first.weekday().num_days_from_sunday() as usize;

        for date in first.iter_days().take_while(|d| *d < next_first) {
            if let Some(cell) = week.get_mut(slot) {
                *cell = Some(DayCell {
                    day: date.day(),
                    date,
                    holiday: find_holiday(holidays, date).map(|h| h.reason.clone()),
                    is_today: date == today,
                });
            }
            slot += 1;
            if slot == 7 {
                weeks.push(std::mem::take(&mut week));
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }

        Some(Self { year, month, weeks })
    }

    /// Year and month of the previous month.
    #[must_use]
    pub const fn previous(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }

    /// Year and month of the next month.
    #[must_use]
    pub const fn next(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }

    /// Heading such as `2025년 3월`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}년 {}월", self.year, self.month)
    }

    /// Number of holidays shown in this month.
    #[must_use]
    pub fn holiday_count(&self) -> usize {
        self.weeks
            .iter()
            .flatten()
            .flatten()
            .filter(|cell| cell.holiday.is_some())
            .count()
    }
}

/// Format a `?month=` query value, e.g. `2025-03`.
#[must_use]
pub fn month_param(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

/// Parse a `YYYY-MM` query value.
#[must_use]
pub fn parse_month_param(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.trim().split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}
