//! Holiday JSON endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use doughda_core::{Holiday, HolidayCheck, HolidayCheckQuery, HolidayId, HolidayPatch, NewHoliday};
use tracing::instrument;

use super::{IdBody, Success};
use crate::error::{ApiJson, AppError, Result};
use crate::state::AppState;

/// GET /api/holidays
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Holiday>>> {
    Ok(Json(state.storage().holidays().list_by_date().await?))
}

/// POST /api/holidays
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewHoliday>,
) -> Result<Json<Holiday>> {
    Ok(Json(state.storage().holidays().create(input).await?))
}

/// PATCH /api/holidays/{id}
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<HolidayPatch>,
) -> Result<Json<Holiday>> {
    Ok(Json(
        state
            .storage()
            .holidays()
            .update(&HolidayId::new(id), patch)
            .await?,
    ))
}

/// DELETE /api/holidays/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Success>> {
    state.storage().holidays().delete(&HolidayId::new(id)).await?;
    Ok(Json(Success::OK))
}

/// DELETE /api/holidays with `{"id"}` in the body.
#[instrument(skip_all)]
pub async fn delete_from_body(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<IdBody<HolidayId>>,
) -> Result<Json<Success>> {
    let id = body
        .id
        .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    state.storage().holidays().delete(&id).await?;
    Ok(Json(Success::OK))
}

/// GET /api/holidays/check?date=YYYY-MM-DD (default today)
#[instrument(skip(state))]
pub async fn check(
    State(state): State<AppState>,
    Query(query): Query<HolidayCheckQuery>,
) -> Result<Json<HolidayCheck>> {
    let date = query.date_or(chrono::Local::now().date_naive())?;
    let holiday = state.storage().holidays().holiday_on(date).await?;
    Ok(Json(HolidayCheck::new(date, holiday)))
}
