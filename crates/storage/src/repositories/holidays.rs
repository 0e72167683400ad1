//! Holiday repository.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use doughda_core::{Holiday, HolidayId, HolidayPatch, NewHoliday, find_holiday};
use tracing::instrument;

use crate::error::RepositoryError;
use crate::keys;
use crate::kv::KeyValueStore;
use crate::typed::Collection;

/// Holiday CRUD over the `holidays` array.
#[derive(Clone)]
pub struct HolidayRepository {
    holidays: Collection<Holiday>,
}

impl HolidayRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            holidays: Collection::new(store, keys::HOLIDAYS),
        }
    }

    /// All holidays in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the document cannot be read.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Holiday>, RepositoryError> {
        self.holidays.load().await
    }

    /// All holidays sorted by date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the document cannot be read.
    pub async fn list_by_date(&self) -> Result<Vec<Holiday>, RepositoryError> {
        let mut holidays = self.holidays.load().await?;
        holidays.sort_by_key(|h| h.date);
        Ok(holidays)
    }

    /// Get a holiday by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no holiday has this id.
    pub async fn get(&self, id: &HolidayId) -> Result<Holiday, RepositoryError> {
        self.holidays
            .load()
            .await?
            .into_iter()
            .find(|h| &h.id == id)
            .ok_or(RepositoryError::NotFound)
    }

    /// The holiday falling on `date`, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the document cannot be read.
    #[instrument(skip(self))]
    pub async fn holiday_on(&self, date: NaiveDate) -> Result<Option<Holiday>, RepositoryError> {
        let holidays = self.holidays.load().await?;
        Ok(find_holiday(&holidays, date).cloned())
    }

    /// Create a holiday.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the reason is blank.
    pub async fn create(&self, input: NewHoliday) -> Result<Holiday, RepositoryError> {
        self.create_at(input, Utc::now()).await
    }

    /// Create a holiday stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the reason is blank.
    #[instrument(skip(self, input))]
    pub async fn create_at(
        &self,
        input: NewHoliday,
        now: DateTime<Utc>,
    ) -> Result<Holiday, RepositoryError> {
        let mut holidays = self.holidays.load().await?;
        let id = HolidayId::generate(now.timestamp_millis(), holidays.iter().map(|h| &h.id));
        let holiday = input.into_holiday(id, now)?;

        holidays.push(holiday.clone());
        self.holidays.save(&holidays).await?;

        tracing::info!(holiday_id = %holiday.id, date = %holiday.date, "Holiday created");
        Ok(holiday)
    }

    /// Merge submitted fields into a holiday and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no holiday has this id, or
    /// `RepositoryError::Validation` if the patch is invalid.
    #[instrument(skip(self, patch), fields(holiday_id = %id))]
    pub async fn update(
        &self,
        id: &HolidayId,
        patch: HolidayPatch,
    ) -> Result<Holiday, RepositoryError> {
        let mut holidays = self.holidays.load().await?;
        let holiday = holidays
            .iter_mut()
            .find(|h| &h.id == id)
            .ok_or(RepositoryError::NotFound)?;

        holiday.apply(patch, Utc::now())?;
        let updated = holiday.clone();
        self.holidays.save(&holidays).await?;

        tracing::info!(holiday_id = %updated.id, "Holiday updated");
        Ok(updated)
    }

    /// Remove a holiday.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no holiday has this id.
    #[instrument(skip(self), fields(holiday_id = %id))]
    pub async fn delete(&self, id: &HolidayId) -> Result<Holiday, RepositoryError> {
        let mut holidays = self.holidays.load().await?;
        let index = holidays
            .iter()
            .position(|h| &h.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let removed = holidays.remove(index);
        self.holidays.save(&holidays).await?;

        tracing::info!(holiday_id = %removed.id, "Holiday deleted");
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_holiday(on: NaiveDate, reason: &str, recurring: bool) -> NewHoliday {
        NewHoliday {
            date: on,
            reason: reason.to_string(),
            description: None,
            is_recurring_yearly: recurring,
        }
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps() {
        let repo = HolidayRepository::new(Arc::new(MemoryStore::new()));
        let holiday = repo
            .create(new_holiday(date(2025, 1, 1), "New Year", true))
            .await
            .unwrap();

        assert!(holiday.created_at.is_some());
        assert_eq!(holiday.created_at, holiday.updated_at);
        assert_eq!(repo.get(&holiday.id).await.unwrap(), holiday);
    }

    #[tokio::test]
    async fn test_recurring_holiday_matches_any_year() {
        let repo = HolidayRepository::new(Arc::new(MemoryStore::new()));
        repo.create(new_holiday(date(2020, 12, 25), "Christmas", true))
            .await
            .unwrap();
        repo.create(new_holiday(date(2025, 3, 3), "Inventory day", false))
            .await
            .unwrap();

        let found = repo.holiday_on(date(2031, 12, 25)).await.unwrap();
        assert_eq!(found.unwrap().reason, "Christmas");
        assert!(repo.holiday_on(date(2026, 3, 3)).await.unwrap().is_none());
        assert!(repo.holiday_on(date(2025, 3, 3)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = HolidayRepository::new(Arc::new(MemoryStore::new()));
        let holiday = repo
            .create(new_holiday(date(2025, 5, 5), "Children's Day", false))
            .await
            .unwrap();

        let updated = repo
            .update(
                &holiday.id,
                HolidayPatch {
                    is_recurring_yearly: Some(true),
                    ..HolidayPatch::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_recurring_yearly);
        assert_eq!(updated.reason, "Children's Day");

        repo.delete(&holiday.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.delete(&holiday.id).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_reads_legacy_numeric_ids() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store
            .set(
                keys::HOLIDAYS,
                r#"[{"id":1712345678901,"date":"2024-04-10","reason":"Election day","created_at":"2024-04-01T00:00:00Z","updated_at":"2024-04-01T00:00:00Z"},
                    {"id":"abc","date":"2024-09-17","name":"Chuseok","description":"","isRecurringYearly":false}]"#
                    .to_string(),
            )
            .await
            .unwrap();

        let repo = HolidayRepository::new(store);
        let holidays = repo.list_by_date().await.unwrap();
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].id.as_str(), "1712345678901");
        assert_eq!(holidays[1].reason, "Chuseok");

        repo.delete(&HolidayId::new("1712345678901")).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
