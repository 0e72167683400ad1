//! JSON login and logout.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::Success;
use crate::error::{ApiJson, AppError, Result};
use crate::middleware::{log_in, log_out};
use crate::routes::auth::LoginCheck;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/admin/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<Success>> {
    match LoginCheck::of(&state, body.password.as_deref()) {
        LoginCheck::Missing => Err(AppError::BadRequest("Password is required".to_string())),
        LoginCheck::Wrong => {
            tracing::warn!("Admin API login failed");
            Err(AppError::Unauthorized("Invalid password".to_string()))
        }
        LoginCheck::Accepted => {
            log_in(&session).await?;
            tracing::info!("Admin logged in via API");
            Ok(Json(Success::OK))
        }
    }
}

/// POST /api/admin/logout
pub async fn logout(session: Session) -> Result<Json<Success>> {
    log_out(&session).await?;
    Ok(Json(Success::OK))
}
