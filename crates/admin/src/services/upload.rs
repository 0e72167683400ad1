//! Image uploads: multipart field capture, validation and storage.

use axum::body::Bytes;
use axum::extract::multipart::Field;
use doughda_core::upload::validate_image_upload;
use doughda_storage::{Storage, StoredAsset};
use tracing::instrument;

use crate::error::AppError;

/// Multipart body limit for routes that accept an image.
///
/// Slightly above the 5 MiB file limit so oversized files reach validation
/// and get a clear message instead of a bare 413.
pub const UPLOAD_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// A file received in a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Read a file field. Returns `None` when the browser sent an empty
    /// file input (no name and no content).
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the multipart stream is malformed.
    pub async fn from_field(field: Field<'_>) -> Result<Option<Self>, AppError> {
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if file_name.is_empty() && bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { file_name, bytes }))
    }
}

/// Validate an uploaded image and write it to the asset store.
///
/// # Errors
///
/// Returns `AppError::Validation` for unsupported extensions or files over
/// 5 MiB, and `AppError::Asset` if the asset store fails.
#[instrument(skip(storage, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
pub async fn save_image(storage: &Storage, file: UploadedFile) -> Result<StoredAsset, AppError> {
    let kind = validate_image_upload(&file.file_name, file.bytes.len())?;
    let asset = storage
        .assets()
        .put(&file.file_name, file.bytes.to_vec(), kind.content_type())
        .await?;

    tracing::info!(url = %asset.url, "Image uploaded");
    Ok(asset)
}

/// Best-effort removal of an uploaded image that no product kept.
pub async fn discard_image(storage: &Storage, url: &str) {
    if let Err(e) = storage.assets().delete(url).await {
        tracing::warn!(error = %e, image = %url, "Failed to delete unused image");
    }
}

/// Pass `result` through, dropping the freshly uploaded `image` if it failed.
pub async fn discard_on_error<T, E>(
    storage: &Storage,
    image: Option<&str>,
    result: Result<T, E>,
) -> Result<T, E> {
    if result.is_err()
        && let Some(url) = image
    {
        discard_image(storage, url).await;
    }
    result
}
