//! Admin session marker and auth gates.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::{
    Expiry, Session,
    cookie::time::{Duration, OffsetDateTime},
};

use super::session::SESSION_TTL_HOURS;
use crate::error::AppError;

/// Session key holding the admin marker.
pub const ADMIN_SESSION_KEY: &str = "admin";

/// Login page that unauthenticated page requests are sent to.
pub const LOGIN_PATH: &str = "/admin/login";

/// Marker stored in the session after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub logged_in_at: DateTime<Utc>,
}

/// Whether the session carries the admin marker.
pub async fn is_admin(session: &Session) -> bool {
    session
        .get::<AdminSession>(ADMIN_SESSION_KEY)
        .await
        .ok()
        .flatten()
        .is_some()
}

/// Mark the session as logged in for [`SESSION_TTL_HOURS`].
///
/// The session id is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn log_in(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(
            ADMIN_SESSION_KEY,
            AdminSession {
                logged_in_at: Utc::now(),
            },
        )
        .await?;
    session.set_expiry(Some(Expiry::AtDateTime(
        OffsetDateTime::now_utc() + Duration::hours(SESSION_TTL_HOURS),
    )));
    Ok(())
}

/// Clear the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn log_out(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

/// Gate for admin pages: no admin session redirects to the login page.
pub async fn require_admin_page(session: Session, request: Request, next: Next) -> Response {
    if is_admin(&session).await {
        return next.run(request).await;
    }
    tracing::debug!(path = %request.uri().path(), "Redirecting to login");
    Redirect::to(LOGIN_PATH).into_response()
}

/// Gate for the JSON API: reads are public, writes need an admin session.
pub async fn require_admin_for_writes(session: Session, request: Request, next: Next) -> Response {
    let is_read = matches!(*request.method(), Method::GET | Method::HEAD | Method::OPTIONS);
    if is_read || is_admin(&session).await {
        return next.run(request).await;
    }
    AppError::Unauthorized("Admin login required".to_string()).into_response()
}
