//! Read-only JSON API.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use doughda_core::{
    Holiday, HolidayCheck, HolidayCheckQuery, Product, ProductId, StoreHours, StoreStatus,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

const NO_STORE: [(axum::http::HeaderName, &str); 1] = [(CACHE_CONTROL, "no-store")];

/// GET /api/products
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products: Vec<Product> = state.storage().products().list().await?;
    Ok((NO_STORE, Json(products)))
}

/// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product = state.storage().products().get(&ProductId::new(id)).await?;
    Ok((NO_STORE, Json(product)))
}

/// GET /api/holidays
#[instrument(skip(state))]
pub async fn list_holidays(State(state): State<AppState>) -> Result<Json<Vec<Holiday>>> {
    Ok(Json(state.storage().holidays().list_by_date().await?))
}

/// GET /api/holidays/check?date=YYYY-MM-DD (default today)
#[instrument(skip(state))]
pub async fn check_holiday(
    State(state): State<AppState>,
    Query(query): Query<HolidayCheckQuery>,
) -> Result<Json<HolidayCheck>> {
    let date = query
        .date_or(chrono::Local::now().date_naive())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let holiday = state.storage().holidays().holiday_on(date).await?;
    Ok(Json(HolidayCheck::new(date, holiday)))
}

/// GET /api/store/status
#[instrument(skip(state))]
pub async fn store_status(State(state): State<AppState>) -> Result<Json<StoreStatus>> {
    Ok(Json(state.storage().store_status().get().await?))
}

/// GET /api/store/hours
#[instrument(skip(state))]
pub async fn store_hours(State(state): State<AppState>) -> Result<Json<Vec<StoreHours>>> {
    Ok(Json(state.storage().store_hours().list().await?))
}
