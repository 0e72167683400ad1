//! Persistence for the Doughda bakery.
//!
//! Every entity lives as one JSON document under a fixed key in a
//! [`KeyValueStore`]. Mutations read the whole document, change it in memory
//! and write it back; there is no locking, so concurrent writers race and the
//! last write wins.
//!
//! # Layers
//!
//! - [`kv`]: raw string documents (file, blob, Redis or in-memory backend)
//! - [`typed`]: JSON arrays and singleton objects on top of a store
//! - [`repositories`]: product, holiday and store operations
//! - [`assets`]: uploaded product images
//! - [`config`]: backend selection from the environment

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assets;
pub mod config;
pub mod error;
pub mod kv;
pub mod repositories;
pub mod typed;

use std::sync::Arc;

pub use assets::{AssetStore, BlobAssetStore, LocalAssetStore, MemoryAssetStore, StoredAsset};
pub use config::{AssetBackend, BlobConfig, ConfigError, StorageBackend, StorageConfig};
pub use error::{RepositoryError, StoreError};
pub use kv::{BlobStore, FileStore, KeyValueStore, MemoryStore, RedisStore};
pub use repositories::{
    HolidayRepository, ProductRepository, StoreHoursRepository, StoreStatusRepository,
};
pub use typed::{Collection, Singleton};

/// Storage keys for each persisted document.
pub mod keys {
    pub const PRODUCTS: &str = "products";
    pub const HOLIDAYS: &str = "holidays";
    pub const STORE_STATUS: &str = "store_status";
    pub const STORE_HOURS: &str = "store_hours";
}

/// The configured document store and asset store.
///
/// Cheap to clone; both halves are shared behind `Arc`.
#[derive(Clone)]
pub struct Storage {
    kv: Arc<dyn KeyValueStore>,
    assets: Arc<dyn AssetStore>,
}

impl Storage {
    /// Bundle an already constructed document store and asset store.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { kv, assets }
    }

    /// In-process storage for tests and demos.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryAssetStore::new()),
        )
    }

    /// The underlying document store.
    #[must_use]
    pub fn kv(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    /// The underlying asset store.
    #[must_use]
    pub fn assets(&self) -> &Arc<dyn AssetStore> {
        &self.assets
    }

    #[must_use]
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(Arc::clone(&self.kv), Arc::clone(&self.assets))
    }

    #[must_use]
    pub fn holidays(&self) -> HolidayRepository {
        HolidayRepository::new(Arc::clone(&self.kv))
    }

    #[must_use]
    pub fn store_status(&self) -> StoreStatusRepository {
        StoreStatusRepository::new(Arc::clone(&self.kv))
    }

    #[must_use]
    pub fn store_hours(&self) -> StoreHoursRepository {
        StoreHoursRepository::new(Arc::clone(&self.kv))
    }

    /// Check that the document store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the store cannot be reached.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.kv.ping().await
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("kv", &self.kv.backend_name())
            .field("assets", &self.assets.backend_name())
            .finish()
    }
}
