//! HTTP object storage (`GET`/`PUT <base>/<key>.json` with a bearer token).

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};

use super::{KeyValueStore, validate_key};
use crate::error::StoreError;

/// Stores each document as a JSON object in blob storage.
#[derive(Clone)]
pub struct BlobStore {
    client: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl BlobStore {
    /// Create a store rooted at `base_url`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, token: SecretString) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{key}.json", self.base_url)
    }
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KeyValueStore for BlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let url = self.url_for(key);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.text().await?)),
            status => Err(StoreError::UnexpectedStatus {
                target: url,
                status: status.as_u16(),
            }),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        validate_key(key)?;
        let url = self.url_for(key);
        let response = self
            .client
            .put(&url)
            .bearer_auth(self.token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .body(value)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::UnexpectedStatus {
                target: url,
                status: response.status().as_u16(),
            })
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        // Any answer short of a server error means the endpoint is reachable.
        let response = self
            .client
            .head(&self.base_url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        if response.status().is_server_error() {
            return Err(StoreError::UnexpectedStatus {
                target: self.base_url.clone(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "blob"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let store = BlobStore::new(
            reqwest::Client::new(),
            "https://blob.example.com/doughda/",
            SecretString::from("token"),
        );
        assert_eq!(
            store.url_for("products"),
            "https://blob.example.com/doughda/products.json"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let store = BlobStore::new(
            reqwest::Client::new(),
            "https://blob.example.com",
            SecretString::from("super-secret-blob-token"),
        );
        let debug = format!("{store:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-blob-token"));
    }
}
