//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (?month=YYYY-MM for the calendar)
//!
//! # Read-only JSON API
//! GET  /api/products            - Product list
//! GET  /api/products/{id}       - Single product
//! GET  /api/holidays            - Holiday list
//! GET  /api/holidays/check      - Is-holiday check (?date=YYYY-MM-DD, default today)
//! GET  /api/store/status        - Store open/closed status
//! GET  /api/store/hours         - Weekly opening hours
//! ```

pub mod api;
pub mod home;

use axum::{Router, routing::get};

use crate::middleware::api_rate_limiter;
use crate::state::AppState;

/// Create the read-only API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::list_products))
        .route("/products/{id}", get(api::get_product))
        .route("/holidays", get(api::list_holidays))
        .route("/holidays/check", get(api::check_holiday))
        .route("/store/status", get(api::store_status))
        .route("/store/hours", get(api::store_hours))
        .layer(api_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/api", api_routes())
}
