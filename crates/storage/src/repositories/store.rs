//! Store status and opening hours repositories.

use std::sync::Arc;

use doughda_core::{StoreHours, StoreStatus, StoreStatusPatch, validate_hours};
use tracing::instrument;

use crate::error::RepositoryError;
use crate::keys;
use crate::kv::KeyValueStore;
use crate::typed::{Collection, Singleton};

/// The single `store_status` record.
#[derive(Clone)]
pub struct StoreStatusRepository {
    status: Singleton<StoreStatus>,
}

impl StoreStatusRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            status: Singleton::new(store, keys::STORE_STATUS),
        }
    }

    /// Current status; `{"isOpen": true}` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the document cannot be read.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<StoreStatus, RepositoryError> {
        self.status.load().await
    }

    /// Replace the whole record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    #[instrument(skip(self))]
    pub async fn set(&self, status: StoreStatus) -> Result<StoreStatus, RepositoryError> {
        self.status.save(&status).await?;
        tracing::info!(is_open = status.is_open, "Store status replaced");
        Ok(status)
    }

    /// Change only the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read or write fails.
    #[instrument(skip(self))]
    pub async fn merge(&self, patch: StoreStatusPatch) -> Result<StoreStatus, RepositoryError> {
        let mut status = self.status.load().await?;
        status.merge(patch);
        self.status.save(&status).await?;
        tracing::info!(is_open = status.is_open, "Store status updated");
        Ok(status)
    }
}

/// The weekly `store_hours` rows.
#[derive(Clone)]
pub struct StoreHoursRepository {
    hours: Collection<StoreHours>,
}

impl StoreHoursRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            hours: Collection::new(store, keys::STORE_HOURS),
        }
    }

    /// Stored rows sorted Sunday first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<StoreHours>, RepositoryError> {
        let mut rows = self.hours.load().await?;
        rows.sort_by_key(|row| row.day_of_week);
        Ok(rows)
    }

    /// Validate and replace all rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` for out-of-range or duplicate
    /// weekdays and open rows whose opening time is not before closing time.
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub async fn replace(&self, mut rows: Vec<StoreHours>) -> Result<Vec<StoreHours>, RepositoryError> {
        validate_hours(&rows)?;
        rows.sort_by_key(|row| row.day_of_week);
        self.hours.save(&rows).await?;
        tracing::info!("Store hours replaced");
        Ok(rows)
    }
}
