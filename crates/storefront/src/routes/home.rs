//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use chrono::Datelike;
use doughda_core::calendar::{MonthView, month_param, parse_month_param};
use doughda_core::{
    HolidayOccurrence, Product, StoreHours, StoreStatus, hours_for, upcoming_holidays,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Number of upcoming holidays listed under the calendar.
const UPCOMING_HOLIDAYS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub month: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<Product>,
    pub status: StoreStatus,
    pub hours: Vec<StoreHours>,
    pub today_hours: Option<StoreHours>,
    /// Reason when today is a holiday.
    pub today_holiday: Option<String>,
    pub calendar: MonthView,
    pub previous_month: String,
    pub next_month: String,
    pub upcoming: Vec<HolidayOccurrence>,
}

/// Display the home page.
///
/// GET /
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let storage = state.storage();
    let today = chrono::Local::now().date_naive();

    let products = storage.products().list().await?;
    let status = storage.store_status().get().await?;
    let hours = storage.store_hours().list().await?;
    let holidays = storage.holidays().list_by_date().await?;

    let (year, month) = query
        .month
        .as_deref()
        .and_then(parse_month_param)
        .unwrap_or((today.year(), today.month()));
    let calendar = MonthView::build(year, month, &holidays, today)
        .ok_or_else(|| AppError::BadRequest("invalid month".to_string()))?;
    let (prev_year, prev_month) = calendar.previous();
    let (next_year, next_month) = calendar.next();

    Ok(HomeTemplate {
        today_hours: hours_for(&hours, today.weekday()).cloned(),
        today_holiday: doughda_core::find_holiday(&holidays, today).map(|h| h.reason.clone()),
        upcoming: upcoming_holidays(&holidays, today, UPCOMING_HOLIDAYS),
        products,
        status,
        hours,
        calendar,
        previous_month: month_param(prev_year, prev_month),
        next_month: month_param(next_year, next_month),
    })
}
