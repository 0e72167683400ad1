//! Store status and hours JSON endpoints.

use axum::{Json, extract::State};
use doughda_core::{StoreHours, StoreStatus, StoreStatusPatch};
use tracing::instrument;

use crate::error::{ApiJson, Result};
use crate::state::AppState;

/// GET /api/store/status
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Result<Json<StoreStatus>> {
    Ok(Json(state.storage().store_status().get().await?))
}

/// POST /api/store/status - replace the whole record.
#[instrument(skip(state))]
pub async fn replace_status(
    State(state): State<AppState>,
    ApiJson(status): ApiJson<StoreStatus>,
) -> Result<Json<StoreStatus>> {
    Ok(Json(state.storage().store_status().set(status).await?))
}

/// PATCH /api/store/status - change only the submitted fields.
#[instrument(skip(state))]
pub async fn merge_status(
    State(state): State<AppState>,
    ApiJson(patch): ApiJson<StoreStatusPatch>,
) -> Result<Json<StoreStatus>> {
    Ok(Json(state.storage().store_status().merge(patch).await?))
}

/// GET /api/store/hours
#[instrument(skip(state))]
pub async fn hours(State(state): State<AppState>) -> Result<Json<Vec<StoreHours>>> {
    Ok(Json(state.storage().store_hours().list().await?))
}

/// PUT /api/store/hours - replace the weekly table after validation.
#[instrument(skip_all)]
pub async fn replace_hours(
    State(state): State<AppState>,
    ApiJson(rows): ApiJson<Vec<StoreHours>>,
) -> Result<Json<Vec<StoreHours>>> {
    Ok(Json(state.storage().store_hours().replace(rows).await?))
}
