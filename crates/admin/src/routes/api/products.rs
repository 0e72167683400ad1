//! Product JSON endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use doughda_core::{NewProduct, Product, ProductId, ProductPatch};
use tracing::instrument;

use super::{IdBody, Success};
use crate::error::{ApiJson, AppError, Result};
use crate::state::AppState;

const NO_STORE: [(axum::http::HeaderName, &str); 1] = [(CACHE_CONTROL, "no-store")];

/// GET /api/products
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products: Vec<Product> = state.storage().products().list().await?;
    Ok((NO_STORE, Json(products)))
}

/// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse> {
    let product = state.storage().products().get(&ProductId::new(id)).await?;
    Ok((NO_STORE, Json(product)))
}

/// POST /api/products
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewProduct>,
) -> Result<impl IntoResponse> {
    let product = state.storage().products().create(input).await?;
    Ok((NO_STORE, Json(product)))
}

/// PATCH /api/products/{id}
///
/// An `id` in the body is ignored; the path decides which product changes.
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<impl IntoResponse> {
    let product = state
        .storage()
        .products()
        .update(&ProductId::new(id), patch)
        .await?;
    Ok((NO_STORE, Json(product)))
}

/// PATCH /api/products with the id in the body.
#[instrument(skip_all)]
pub async fn update_from_body(
    State(state): State<AppState>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<impl IntoResponse> {
    let id = patch
        .id
        .clone()
        .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    let product = state.storage().products().update(&id, patch).await?;
    Ok((NO_STORE, Json(product)))
}

/// DELETE /api/products/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Success>> {
    state.storage().products().delete(&ProductId::new(id)).await?;
    Ok(Json(Success::OK))
}

/// DELETE /api/products with `{"id"}` in the body.
#[instrument(skip_all)]
pub async fn delete_from_body(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<IdBody<ProductId>>,
) -> Result<Json<Success>> {
    let id = body
        .id
        .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    state.storage().products().delete(&id).await?;
    Ok(Json(Success::OK))
}
