//! Storage configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `STORAGE_BACKEND` - `file` (default), `blob`, `redis` or `memory`
//! - `DATA_DIR` - Directory for the file backend (default: `data`)
//! - `UPLOAD_DIR` - Directory for local uploads (default: `data/uploads`)
//! - `UPLOAD_URL_PREFIX` - URL path local uploads are served under (default: `/uploads`)
//! - `ASSET_BACKEND` - `local`, `blob` or `memory` (default follows `STORAGE_BACKEND`)
//!
//! ## Blob storage (required when either backend is `blob`)
//! - `BLOB_BASE_URL` - Base URL for reads and writes
//! - `BLOB_PUBLIC_BASE_URL` - Base URL for public image links (default: `BLOB_BASE_URL`)
//! - `BLOB_TOKEN` - Bearer token
//!
//! ## Redis (required when `STORAGE_BACKEND=redis`)
//! - `REDIS_URL` - Connection URL (may contain a password)

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::assets::{AssetStore, BlobAssetStore, LocalAssetStore, MemoryAssetStore};
use crate::error::StoreError;
use crate::kv::{BlobStore, FileStore, KeyValueStore, MemoryStore, RedisStore};
use crate::Storage;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Blob,
    Redis,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "blob" => Ok(Self::Blob),
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{other}'")),
        }
    }
}

/// Where uploaded images are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetBackend {
    Local,
    Blob,
    Memory,
}

impl AssetBackend {
    /// Default asset backend for a document backend.
    #[must_use]
    pub const fn default_for(backend: StorageBackend) -> Self {
        match backend {
            StorageBackend::Blob => Self::Blob,
            StorageBackend::Memory => Self::Memory,
            StorageBackend::File | StorageBackend::Redis => Self::Local,
        }
    }
}

impl FromStr for AssetBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "blob" => Ok(Self::Blob),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown asset backend '{other}'")),
        }
    }
}

/// Blob storage endpoint and credentials.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct BlobConfig {
    pub base_url: String,
    pub public_base_url: String,
    pub token: SecretString,
}

impl std::fmt::Debug for BlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobConfig")
            .field("base_url", &self.base_url)
            .field("public_base_url", &self.public_base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Storage configuration shared by the storefront and admin binaries.
#[derive(Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub asset_backend: AssetBackend,
    pub data_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub upload_url_prefix: String,
    pub blob: Option<BlobConfig>,
    pub redis_url: Option<SecretString>,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("backend", &self.backend)
            .field("asset_backend", &self.asset_backend)
            .field("data_dir", &self.data_dir)
            .field("upload_dir", &self.upload_dir)
            .field("upload_url_prefix", &self.upload_url_prefix)
            .field("blob", &self.blob)
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl StorageConfig {
    /// Load storage configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a backend name is unknown, a URL is invalid,
    /// or a variable the chosen backend needs is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load storage configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// See [`StorageConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("STORAGE_BACKEND") {
            Some(value) => value
                .parse::<StorageBackend>()
                .map_err(|e| ConfigError::InvalidEnvVar("STORAGE_BACKEND".to_string(), e))?,
            None => StorageBackend::File,
        };
        let asset_backend = match get("ASSET_BACKEND") {
            Some(value) => value
                .parse::<AssetBackend>()
                .map_err(|e| ConfigError::InvalidEnvVar("ASSET_BACKEND".to_string(), e))?,
            None => AssetBackend::default_for(backend),
        };

        let data_dir = PathBuf::from(get("DATA_DIR").unwrap_or_else(|| "data".to_string()));
        let upload_dir =
            PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "data/uploads".to_string()));
        let upload_url_prefix = normalize_prefix(
            &get("UPLOAD_URL_PREFIX").unwrap_or_else(|| "/uploads".to_string()),
        );

        let blob = if backend == StorageBackend::Blob || asset_backend == AssetBackend::Blob {
            let base_url = require_url(&get, "BLOB_BASE_URL")?;
            let public_base_url = match get("BLOB_PUBLIC_BASE_URL") {
                Some(url) => validate_url("BLOB_PUBLIC_BASE_URL", url)?,
                None => base_url.clone(),
            };
            let token = get("BLOB_TOKEN")
                .ok_or_else(|| ConfigError::MissingEnvVar("BLOB_TOKEN".to_string()))?;
            Some(BlobConfig {
                base_url,
                public_base_url,
                token: SecretString::from(token),
            })
        } else {
            None
        };

        let redis_url = if backend == StorageBackend::Redis {
            let url = get("REDIS_URL")
                .ok_or_else(|| ConfigError::MissingEnvVar("REDIS_URL".to_string()))?;
            url::Url::parse(&url)
                .map_err(|e| ConfigError::InvalidEnvVar("REDIS_URL".to_string(), e.to_string()))?;
            Some(SecretString::from(url))
        } else {
            None
        };

        Ok(Self {
            backend,
            asset_backend,
            data_dir,
            upload_dir,
            upload_url_prefix,
            blob,
            redis_url,
        })
    }

    /// In-memory configuration for tests and demos.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            asset_backend: AssetBackend::Memory,
            data_dir: PathBuf::from("data"),
            upload_dir: PathBuf::from("data/uploads"),
            upload_url_prefix: "/uploads".to_string(),
            blob: None,
            redis_url: None,
        }
    }

    /// Directory to serve under `upload_url_prefix`, when uploads are local.
    #[must_use]
    pub fn local_upload_dir(&self) -> Option<&PathBuf> {
        (self.asset_backend == AssetBackend::Local).then_some(&self.upload_dir)
    }

    /// Whether uploads live in process memory and must be served by the app.
    #[must_use]
    pub fn serves_memory_uploads(&self) -> bool {
        self.asset_backend == AssetBackend::Memory
    }

    /// Build the configured document and asset stores.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a backend cannot be set up, for example when
    /// Redis is unreachable.
    pub async fn connect(&self) -> Result<Storage, StoreError> {
        let client = reqwest::Client::new();

        let kv: Arc<dyn KeyValueStore> = match self.backend {
            StorageBackend::File => Arc::new(FileStore::new(&self.data_dir)),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Blob => {
                let blob = self.blob_config()?;
                Arc::new(BlobStore::new(
                    client.clone(),
                    &blob.base_url,
                    blob.token.clone(),
                ))
            }
            StorageBackend::Redis => {
                let url = self.redis_url.as_ref().ok_or_else(|| missing("REDIS_URL"))?;
                Arc::new(RedisStore::connect(url.expose_secret()).await?)
            }
        };

        let assets: Arc<dyn AssetStore> = match self.asset_backend {
            AssetBackend::Local => Arc::new(LocalAssetStore::new(
                &self.upload_dir,
                &self.upload_url_prefix,
            )),
            AssetBackend::Memory => Arc::new(MemoryAssetStore::new()),
            AssetBackend::Blob => {
                let blob = self.blob_config()?;
                Arc::new(BlobAssetStore::new(
                    client,
                    &blob.base_url,
                    &blob.public_base_url,
                    blob.token.clone(),
                ))
            }
        };

        tracing::info!(
            backend = kv.backend_name(),
            assets = assets.backend_name(),
            "Storage configured"
        );
        Ok(Storage::new(kv, assets))
    }

    fn blob_config(&self) -> Result<&BlobConfig, StoreError> {
        self.blob.as_ref().ok_or_else(|| missing("BLOB_BASE_URL"))
    }
}

fn missing(var: &str) -> StoreError {
    StoreError::NotConfigured(var.to_string())
}

fn require_url<F>(get: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    validate_url(key, value)
}

fn validate_url(key: &str, value: String) -> Result<String, ConfigError> {
    let url = url::Url::parse(&value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an http or https URL".to_string(),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    format!("/{trimmed}")
}
