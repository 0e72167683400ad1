//! Store holidays (days the bakery is closed).

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::define_id;
use crate::error::{ValidationError, require_non_blank};

define_id!(HolidayId);

/// A day the bakery is closed.
///
/// Timestamps keep their snake_case names from the stored format and are
/// optional because older records were written without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: HolidayId,
    pub date: NaiveDate,
    #[serde(alias = "name")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Match every year on the same month and day.
    #[serde(default)]
    pub is_recurring_yearly: bool,
    #[serde(
        rename = "created_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updated_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Holiday {
    /// Whether this holiday falls on `date`.
    ///
    /// Yearly-recurring holidays compare month and day only. A recurring
    /// February 29 therefore only matches in leap years.
    #[must_use]
    pub fn matches(&self, date: NaiveDate) -> bool {
        if self.is_recurring_yearly {
            self.date.month() == date.month() && self.date.day() == date.day()
        } else {
            self.date == date
        }
    }

    /// The first date on or after `from` this holiday falls on.
    ///
    /// One-off holidays before `from` have none. A recurring February 29
    /// moves to the next leap year.
    #[must_use]
    pub fn next_occurrence(&self, from: NaiveDate) -> Option<NaiveDate> {
        if !self.is_recurring_yearly {
            return (self.date >= from).then_some(self.date);
        }
        (from.year()..=from.year() + 8)
            .filter_map(|year| NaiveDate::from_ymd_opt(year, self.date.month(), self.date.day()))
            .find(|date| *date >= from)
    }

    /// Merge submitted fields and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Required` if the patch submits a blank reason.
    pub fn apply(&mut self, patch: HolidayPatch, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if let Some(reason) = &patch.reason {
            require_non_blank("reason", reason)?;
        }

        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(reason) = patch.reason {
            self.reason = reason.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(recurring) = patch.is_recurring_yearly {
            self.is_recurring_yearly = recurring;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}

/// Input for creating a holiday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHoliday {
    pub date: NaiveDate,
    #[serde(default, alias = "name")]
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring_yearly: bool,
}

impl NewHoliday {
    /// Validate the input and build a holiday stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Required` if the reason is blank.
    pub fn into_holiday(self, id: HolidayId, now: DateTime<Utc>) -> Result<Holiday, ValidationError> {
        require_non_blank("reason", &self.reason)?;
        Ok(Holiday {
            id,
            date: self.date,
            reason: self.reason.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            is_recurring_yearly: self.is_recurring_yearly,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }
}

/// Partial update for a holiday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayPatch {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "name")]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring_yearly: Option<bool>,
}

/// Find the first holiday falling on `date`.
#[must_use]
pub fn find_holiday(holidays: &[Holiday], date: NaiveDate) -> Option<&Holiday> {
    holidays.iter().find(|h| h.matches(date))
}

/// A holiday together with the date it next falls on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayOccurrence {
    pub date: NaiveDate,
    pub holiday: Holiday,
}

/// The next `limit` holiday dates on or after `from`, soonest first.
///
/// Recurring holidays are placed on their next anniversary rather than their
/// stored date.
#[must_use]
pub fn upcoming_holidays(holidays: &[Holiday], from: NaiveDate, limit: usize) -> Vec<HolidayOccurrence> {
    let mut upcoming: Vec<HolidayOccurrence> = holidays
        .iter()
        .filter_map(|holiday| {
            holiday.next_occurrence(from).map(|date| HolidayOccurrence {
                date,
                holiday: holiday.clone(),
            })
        })
        .collect();
    upcoming.sort_by_key(|o| o.date);
    upcoming.truncate(limit);
    upcoming
}

/// Query string of the is-holiday check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidayCheckQuery {
    pub date: Option<String>,
}

impl HolidayCheckQuery {
    /// The requested date, or `today` when none was given.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Invalid` if the date is not `YYYY-MM-DD`.
    pub fn date_or(&self, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
        match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ValidationError::invalid("date", "expected YYYY-MM-DD")),
            None => Ok(today),
        }
    }
}

/// Answer for the is-holiday check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCheck {
    pub date: NaiveDate,
    pub is_holiday: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday: Option<Holiday>,
}

impl HolidayCheck {
    #[must_use]
    pub fn new(date: NaiveDate, holiday: Option<Holiday>) -> Self {
        Self {
            date,
            is_holiday: holiday.is_some(),
            holiday,
        }
    }
}
