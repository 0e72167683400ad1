//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, routing::get};
use doughda_core::{Holiday, HolidayOccurrence, StoreStatus, upcoming_holidays};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Number of upcoming holidays shown on the dashboard.
const UPCOMING_HOLIDAYS: usize = 3;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub product_count: usize,
    pub sold_out_count: usize,
    pub status: StoreStatus,
    pub today_holiday: Option<Holiday>,
    pub upcoming: Vec<HolidayOccurrence>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin", get(dashboard))
}

/// Overview of products, store status and upcoming holidays.
///
/// GET /admin
#[instrument(skip(state))]
async fn dashboard(State(state): State<AppState>) -> Result<DashboardTemplate> {
    let storage = state.storage();
    let today = chrono::Local::now().date_naive();

    let products = storage.products().list().await?;
    let status = storage.store_status().get().await?;
    let holidays = storage.holidays().list_by_date().await?;

    let today_holiday = doughda_core::find_holiday(&holidays, today).cloned();
    let tomorrow = today.succ_opt().unwrap_or(today);
    let upcoming = upcoming_holidays(&holidays, tomorrow, UPCOMING_HOLIDAYS);

    Ok(DashboardTemplate {
        current_path: "/admin".to_string(),
        product_count: products.len(),
        sold_out_count: products.iter().filter(|p| p.is_sold_out).count(),
        status,
        today_holiday,
        upcoming,
    })
}
