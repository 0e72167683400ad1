//! Authentication route handlers for admin.
//!
//! Provides the password login page, form login and logout. The JSON
//! equivalents live in [`super::api::auth`].

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{auth_rate_limiter, is_admin, log_in, log_out};
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub error: Option<String>,
}

/// Login form input.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: Option<String>,
}

/// Outcome of checking a submitted password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginCheck {
    Missing,
    Wrong,
    Accepted,
}

impl LoginCheck {
    /// Classify `password` against the configured admin password.
    #[must_use]
    pub fn of(state: &AppState, password: Option<&str>) -> Self {
        match password {
            None | Some("") => Self::Missing,
            Some(candidate) if state.passwords().verify(candidate) => Self::Accepted,
            Some(_) => Self::Wrong,
        }
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    let limited = Router::new()
        .route("/admin/login", post(login))
        .route_layer(auth_rate_limiter());

    Router::new()
        .route("/admin/login", get(login_page))
        .route("/admin/logout", post(logout))
        .merge(limited)
}

fn render_login(status: StatusCode, error: Option<String>) -> Response {
    let html = LoginPageTemplate { error }.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    });
    (status, Html(html)).into_response()
}

/// Render the login page, or go to the dashboard when already logged in.
///
/// GET /admin/login
async fn login_page(session: Session) -> Response {
    if is_admin(&session).await {
        return Redirect::to("/admin").into_response();
    }
    render_login(StatusCode::OK, None)
}

/// Check the password and start an admin session.
///
/// POST /admin/login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match LoginCheck::of(&state, form.password.as_deref()) {
        LoginCheck::Missing => Ok(render_login(
            StatusCode::BAD_REQUEST,
            Some("비밀번호를 입력해 주세요.".to_string()),
        )),
        LoginCheck::Wrong => {
            tracing::warn!("Admin login failed");
            Ok(render_login(
                StatusCode::UNAUTHORIZED,
                Some("비밀번호가 올바르지 않습니다.".to_string()),
            ))
        }
        LoginCheck::Accepted => {
            log_in(&session).await?;
            tracing::info!("Admin logged in");
            Ok(Redirect::to("/admin").into_response())
        }
    }
}

/// Logout and clear session.
///
/// POST /admin/logout
async fn logout(session: Session) -> Result<Redirect, AppError> {
    log_out(&session).await?;
    tracing::info!("Admin logged out");
    Ok(Redirect::to("/admin/login"))
}
