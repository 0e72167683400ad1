//! Storage for uploaded product images.

mod blob;
mod local;
mod memory;

use async_trait::async_trait;
use doughda_core::upload::sanitize_file_name;

use crate::error::StoreError;

pub use self::blob::BlobAssetStore;
pub use self::local::LocalAssetStore;
pub use self::memory::MemoryAssetStore;

/// An asset written by an [`AssetStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// URL or path to reference from `Product::image`.
    pub url: String,
    /// Stored file name (`<millis>-<name>`).
    pub file_name: String,
}

/// A backend for uploaded images.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `bytes` and return where they can be fetched.
    async fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredAsset, StoreError>;

    /// Delete the asset behind `url`.
    ///
    /// Returns `false` without touching anything when `url` was not issued by
    /// this store (external links, other prefixes) or is already gone.
    async fn delete(&self, url: &str) -> Result<bool, StoreError>;

    /// Bytes and content type behind `url`, for stores the app serves itself.
    ///
    /// Directory and blob stores are served elsewhere and return `None`.
    async fn read(&self, _url: &str) -> Option<(Vec<u8>, String)> {
        None
    }

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Build the stored name `<millis>-<sanitized name>`.
pub(crate) fn stored_file_name(original: &str, now_millis: i64) -> String {
    format!("{now_millis}-{}", sanitize_file_name(original))
}

/// Extract a single safe path segment following `prefix/` in `url`.
pub(crate) fn owned_segment<'a>(url: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = url.strip_prefix(prefix)?.strip_prefix('/')?;
    let valid = !rest.is_empty()
        && !rest.starts_with('.')
        && !rest.contains(['/', '\\', '?', '#']);
    valid.then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_file_name() {
        assert_eq!(
            stored_file_name("my bread.png", 1_700_000_000_000),
            "1700000000000-my_bread.png"
        );
    }

    #[test]
    fn test_owned_segment() {
        assert_eq!(
            owned_segment("/uploads/1-a.png", "/uploads"),
            Some("1-a.png")
        );
        assert_eq!(owned_segment("/uploads/../etc/passwd", "/uploads"), None);
        assert_eq!(owned_segment("/uploads/.hidden", "/uploads"), None);
        assert_eq!(owned_segment("/uploadsX/a.png", "/uploads"), None);
        assert_eq!(owned_segment("https://cdn.example.com/a.png", "/uploads"), None);
        assert_eq!(owned_segment("/uploads/", "/uploads"), None);
    }
}
