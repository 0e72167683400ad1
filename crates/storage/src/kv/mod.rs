//! Whole-document key-value stores.
//!
//! A store maps a key such as `products` to one JSON string. Overwriting the
//! whole document is the only mutation.

mod blob;
mod file;
mod memory;
mod redis_store;

use async_trait::async_trait;

use crate::error::StoreError;

pub use self::blob::BlobStore;
pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

/// A backend holding one string document per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Reject keys that would escape a directory or URL path segment.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("products").is_ok());
        assert!(validate_key("store_status").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
    }
}
