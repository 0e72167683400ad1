//! Uploaded images in HTTP object storage.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};

use super::{AssetStore, StoredAsset, owned_segment, stored_file_name};
use crate::error::StoreError;

/// Writes uploads to `<base>/uploads/` and links them from the public base.
#[derive(Clone)]
pub struct BlobAssetStore {
    client: reqwest::Client,
    base_url: String,
    public_base_url: String,
    token: SecretString,
}

impl BlobAssetStore {
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        public_base_url: &str,
        token: SecretString,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn public_prefix(&self) -> String {
        format!("{}/uploads", self.public_base_url)
    }
}

impl std::fmt::Debug for BlobAssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobAssetStore")
            .field("base_url", &self.base_url)
            .field("public_base_url", &self.public_base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AssetStore for BlobAssetStore {
    async fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredAsset, StoreError> {
        let stored = stored_file_name(file_name, chrono::Utc::now().timestamp_millis());
        let target = format!("{}/uploads/{stored}", self.base_url);

        let response = self
            .client
            .put(&target)
            .bearer_auth(self.token.expose_secret())
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::UnexpectedStatus {
                target,
                status: response.status().as_u16(),
            });
        }

        Ok(StoredAsset {
            url: format!("{}/{stored}", self.public_prefix()),
            file_name: stored,
        })
    }

    async fn delete(&self, url: &str) -> Result<bool, StoreError> {
        let prefix = self.public_prefix();
        let Some(name) = owned_segment(url, &prefix) else {
            return Ok(false);
        };
        let target = format!("{}/uploads/{name}", self.base_url);

        let response = self
            .client
            .delete(&target)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StoreError::UnexpectedStatus {
                target,
                status: status.as_u16(),
            }),
        }
    }

    fn backend_name(&self) -> &'static str {
        "blob"
    }
}
