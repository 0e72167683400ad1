//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! GET  /admin/login                    - Login page
//! POST /admin/login                    - Password login (rate limited)
//! POST /admin/logout                   - Logout
//!
//! # Pages (admin session required, otherwise redirect to /admin/login)
//! GET  /admin                          - Dashboard
//! GET  /admin/products                 - Product list
//! GET  /admin/products/new             - New product form
//! POST /admin/products                 - Create product (multipart)
//! GET  /admin/products/{id}/edit       - Edit product form
//! POST /admin/products/{id}            - Update product (multipart)
//! POST /admin/products/{id}/sold-out   - Toggle sold out
//! POST /admin/products/{id}/delete     - Delete product
//! GET  /admin/store                    - Store status and hours
//! POST /admin/store/open               - Open the store
//! POST /admin/store/close              - Close the store
//! POST /admin/store/hours              - Replace weekly hours
//! GET  /admin/holidays                 - Holiday list and create form
//! POST /admin/holidays                 - Create holiday
//! GET  /admin/holidays/{id}/edit       - Edit holiday form
//! POST /admin/holidays/{id}            - Update holiday
//! POST /admin/holidays/{id}/delete     - Delete holiday
//!
//! # JSON API (see [`api`])
//! /api/...
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod holidays;
pub mod products;
pub mod store;

use axum::{Router, response::Redirect};
use serde::Deserialize;

use crate::middleware::require_admin_page;
use crate::state::AppState;

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    let pages = Router::new()
        .merge(dashboard::router())
        .merge(products::router())
        .merge(store::router())
        .merge(holidays::router())
        .route_layer(axum::middleware::from_fn(require_admin_page));

    Router::new()
        .merge(auth::router())
        .merge(pages)
        .nest("/api", api::router())
}

/// One-shot status messages carried in the query string after a redirect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flash {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Redirect to `path` with `?success=<message>`.
#[must_use]
pub fn redirect_success(path: &str, message: &str) -> Redirect {
    redirect_with(path, "success", message)
}

/// Redirect to `path` with `?error=<message>`.
#[must_use]
pub fn redirect_error(path: &str, message: &str) -> Redirect {
    redirect_with(path, "error", message)
}

fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Redirect::to(&format!("{path}?{key}={encoded}"))
}

/// HTML checkbox value: present means checked.
fn checkbox(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v, "on" | "true" | "1"))
}
