//! Typed JSON documents on top of a [`KeyValueStore`].

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::RepositoryError;
use crate::kv::KeyValueStore;

/// A JSON array of `T` stored under one key.
///
/// A missing document reads as an empty collection. Every save rewrites the
/// whole array.
pub struct Collection<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Load every record in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails or
    /// `RepositoryError::DataCorruption` if the document is not a valid array.
    pub async fn load(&self) -> Result<Vec<T>, RepositoryError> {
        match self.store.get(self.key).await? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Replace the stored array.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    pub async fn save(&self, items: &[T]) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(self.key, raw).await?;
        Ok(())
    }
}

/// A single JSON object stored under one key.
///
/// A missing document reads as `T::default()`.
pub struct Singleton<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Singleton<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> Singleton<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// Load the record, or the default when none is stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails or
    /// `RepositoryError::DataCorruption` if the document cannot be decoded.
    pub async fn load(&self) -> Result<T, RepositoryError> {
        match self.store.get(self.key).await? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(T::default()),
        }
    }

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    pub async fn save(&self, value: &T) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(self.key, raw).await?;
        Ok(())
    }
}
