//! Image upload endpoint.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::{UploadedFile, save_image};
use crate::state::AppState;

/// Upload response body.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub success: bool,
}

/// POST /api/upload (multipart field `file`)
#[instrument(skip_all)]
pub async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            file = UploadedFile::from_field(field).await?;
            break;
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let asset = save_image(state.storage(), file).await?;

    Ok(Json(UploadResponse {
        url: asset.url,
        success: true,
    }))
}
