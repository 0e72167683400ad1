//! Uploaded images on the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{AssetStore, StoredAsset, owned_segment, stored_file_name};
use crate::error::StoreError;

/// Writes uploads to a directory served under `url_prefix`.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    upload_dir: PathBuf,
    url_prefix: String,
}

impl LocalAssetStore {
    #[must_use]
    pub fn new(upload_dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Directory the files are written to.
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<StoredAsset, StoreError> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        let stored = stored_file_name(file_name, chrono::Utc::now().timestamp_millis());
        tokio::fs::write(self.upload_dir.join(&stored), bytes).await?;

        Ok(StoredAsset {
            url: format!("{}/{stored}", self.url_prefix),
            file_name: stored,
        })
    }

    async fn delete(&self, url: &str) -> Result<bool, StoreError> {
        let Some(name) = owned_segment(url, &self.url_prefix) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(self.upload_dir.join(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
