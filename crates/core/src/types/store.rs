//! Store open/closed status and weekly opening hours.

use std::collections::HashSet;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The single store status record.
///
/// `isOpen` and the annotations are independent: any combination is accepted
/// and there are no transition rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Free-text closing time shown to customers (e.g. `"18:30"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
}

impl Default for StoreStatus {
    fn default() -> Self {
        Self::open()
    }
}

impl StoreStatus {
    /// A plain "open" record with no annotations.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            is_open: true,
            message: None,
            reason: None,
            closed_at: None,
        }
    }

    /// A "closed" record with optional closing time and reason.
    #[must_use]
    pub fn closed(closed_at: Option<String>, reason: Option<String>) -> Self {
        Self {
            is_open: false,
            message: None,
            reason: reason.filter(|r| !r.trim().is_empty()),
            closed_at: closed_at.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Merge submitted fields into the current record.
    pub fn merge(&mut self, patch: StoreStatusPatch) {
        if let Some(is_open) = patch.is_open {
            self.is_open = is_open;
        }
        if let Some(message) = patch.message {
            self.message = Some(message);
        }
        if let Some(reason) = patch.reason {
            self.reason = Some(reason);
        }
        if let Some(closed_at) = patch.closed_at {
            self.closed_at = Some(closed_at);
        }
    }
}

/// Partial update for the store status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatusPatch {
    #[serde(default)]
    pub is_open: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
}

/// Opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHours {
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday.
    pub day_of_week: u8,
    #[serde(with = "hh_mm")]
    pub open_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub close_time: NaiveTime,
    pub is_open: bool,
}

impl StoreHours {
    /// Korean short weekday label for display.
    #[must_use]
    pub const fn weekday_label(&self) -> &'static str {
        match self.day_of_week {
            0 => "일",
            1 => "월",
            2 => "화",
            3 => "수",
            4 => "목",
            5 => "금",
            _ => "토",
        }
    }

    /// Opening time formatted as `HH:MM`.
    #[must_use]
    pub fn open_label(&self) -> String {
        self.open_time.format(hh_mm::FORMAT).to_string()
    }

    /// Closing time formatted as `HH:MM`.
    #[must_use]
    pub fn close_label(&self) -> String {
        self.close_time.format(hh_mm::FORMAT).to_string()
    }
}

/// Check a full weekly hours table before it replaces the stored one.
///
/// # Errors
///
/// Returns a `ValidationError` for weekdays outside 0..=6, duplicate weekdays,
/// or open days whose opening time is not before the closing time.
pub fn validate_hours(rows: &[StoreHours]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for row in rows {
        if row.day_of_week > 6 {
            return Err(ValidationError::InvalidWeekday(row.day_of_week));
        }
        if !seen.insert(row.day_of_week) {
            return Err(ValidationError::DuplicateWeekday(row.day_of_week));
        }
        if row.is_open && row.open_time >= row.close_time {
            return Err(ValidationError::InvalidHours(row.day_of_week));
        }
    }
    Ok(())
}

/// Hours row for a weekday, if configured.
#[must_use]
pub fn hours_for(rows: &[StoreHours], weekday: Weekday) -> Option<&StoreHours> {
    let day = u8::try_from(weekday.num_days_from_sunday()).ok()?;
    rows.iter().find(|r| r.day_of_week == day)
}

/// `HH:MM` serde format for opening hours.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
