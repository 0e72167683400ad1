//! JSON API.
//!
//! Reads are public; every mutating route needs the admin session and
//! answers 401 without it.
//!
//! ```text
//! GET    /api/products            PATCH/DELETE /api/products (id in body)
//! POST   /api/products            GET/PATCH/DELETE /api/products/{id}
//! GET    /api/holidays            POST /api/holidays   DELETE /api/holidays (id in body)
//! GET    /api/holidays/check      PATCH/DELETE /api/holidays/{id}
//! GET    /api/store/status        POST (replace)  PATCH (merge)
//! GET    /api/store/hours         PUT (replace)
//! POST   /api/upload              multipart `file`
//! POST   /api/admin/login         POST /api/admin/logout
//! ```

pub mod auth;
pub mod holidays;
pub mod products;
pub mod store;
pub mod upload;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};

use crate::middleware::{auth_rate_limiter, require_admin_for_writes};
use crate::services::UPLOAD_BODY_LIMIT;
use crate::state::AppState;

/// Body of the legacy delete/update calls that carry the id in the body.
#[derive(Debug, Deserialize)]
pub struct IdBody<I> {
    pub id: Option<I>,
}

/// `{"success": true}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub const OK: Self = Self { success: true };
}

/// Build the API router.
pub fn router() -> Router<AppState> {
    let resources = Router::new()
        .route(
            "/products",
            get(products::list)
                .post(products::create)
                .patch(products::update_from_body)
                .delete(products::delete_from_body),
        )
        .route(
            "/products/{id}",
            get(products::get)
                .patch(products::update)
                .delete(products::delete),
        )
        .route(
            "/holidays",
            get(holidays::list)
                .post(holidays::create)
                .delete(holidays::delete_from_body),
        )
        .route("/holidays/check", get(holidays::check))
        .route(
            "/holidays/{id}",
            patch(holidays::update).delete(holidays::delete),
        )
        .route(
            "/store/status",
            get(store::status)
                .post(store::replace_status)
                .patch(store::merge_status),
        )
        .route("/store/hours", get(store::hours).put(store::replace_hours))
        .route(
            "/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route_layer(axum::middleware::from_fn(require_admin_for_writes));

    let login = Router::new()
        .route("/admin/login", post(auth::login))
        .route_layer(auth_rate_limiter());

    Router::new()
        .merge(resources)
        .merge(login)
        .route("/admin/logout", post(auth::logout))
}
