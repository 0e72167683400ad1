//! In-process asset store for tests and demos.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AssetStore, StoredAsset, owned_segment, stored_file_name};
use crate::error::StoreError;

const URL_PREFIX: &str = "/uploads";

#[derive(Debug, Clone)]
struct MemoryAsset {
    bytes: Vec<u8>,
    content_type: String,
}

/// Keeps uploads in a map; URLs are issued under `/uploads/`.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    assets: RwLock<HashMap<String, MemoryAsset>>,
}

impl MemoryAssetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored assets.
    pub async fn len(&self) -> usize {
        self.assets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.assets.read().await.is_empty()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredAsset, StoreError> {
        let stored = stored_file_name(file_name, chrono::Utc::now().timestamp_millis());
        self.assets.write().await.insert(
            stored.clone(),
            MemoryAsset {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(StoredAsset {
            url: format!("{URL_PREFIX}/{stored}"),
            file_name: stored,
        })
    }

    async fn delete(&self, url: &str) -> Result<bool, StoreError> {
        let Some(name) = owned_segment(url, URL_PREFIX) else {
            return Ok(false);
        };
        Ok(self.assets.write().await.remove(name).is_some())
    }

    async fn read(&self, url: &str) -> Option<(Vec<u8>, String)> {
        let name = owned_segment(url, URL_PREFIX)?;
        self.assets
            .read()
            .await
            .get(name)
            .map(|a| (a.bytes.clone(), a.content_type.clone()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
