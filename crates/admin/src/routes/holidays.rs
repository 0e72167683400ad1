//! Holiday management pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use doughda_core::{Holiday, HolidayId, HolidayPatch, NewHoliday, ValidationError};
use doughda_storage::RepositoryError;
use serde::Deserialize;
use tracing::instrument;

use super::{Flash, checkbox, redirect_error, redirect_success};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

const HOLIDAYS_PATH: &str = "/admin/holidays";

/// Holiday list and create form template.
#[derive(Template, WebTemplate)]
#[template(path = "holidays/index.html")]
pub struct HolidaysIndexTemplate {
    pub current_path: String,
    pub holidays: Vec<Holiday>,
    pub flash: Flash,
}

/// Holiday edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "holidays/edit.html")]
pub struct HolidayEditTemplate {
    pub current_path: String,
    pub holiday: Holiday,
    pub flash: Flash,
}

/// Holiday form input (create and edit).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring_yearly: Option<String>,
}

impl HolidayForm {
    fn parsed_date(&self) -> std::result::Result<NaiveDate, ValidationError> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return Err(ValidationError::Required("date"));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| ValidationError::invalid("date", e))
    }

    fn recurring(&self) -> bool {
        checkbox(self.is_recurring_yearly.as_deref())
    }
}

/// Build the holiday pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/holidays", get(index).post(create))
        .route("/admin/holidays/{id}/edit", get(edit))
        .route("/admin/holidays/{id}", post(update))
        .route("/admin/holidays/{id}/delete", post(delete))
}

/// GET /admin/holidays
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> Result<HolidaysIndexTemplate> {
    Ok(HolidaysIndexTemplate {
        current_path: HOLIDAYS_PATH.to_string(),
        holidays: state.storage().holidays().list_by_date().await?,
        flash,
    })
}

/// POST /admin/holidays
#[instrument(skip(state))]
async fn create(State(state): State<AppState>, Form(form): Form<HolidayForm>) -> Result<Redirect> {
    let date = match form.parsed_date() {
        Ok(date) => date,
        Err(e) => return Ok(redirect_error(HOLIDAYS_PATH, &e.to_string())),
    };
    let is_recurring_yearly = form.recurring();
    let input = NewHoliday {
        date,
        reason: form.reason,
        description: form.description.filter(|d| !d.trim().is_empty()),
        is_recurring_yearly,
    };

    match state.storage().holidays().create(input).await {
        Ok(holiday) => Ok(redirect_success(
            HOLIDAYS_PATH,
            &format!("{} 휴무일이 등록되었습니다.", holiday.reason),
        )),
        Err(RepositoryError::Validation(e)) => Ok(redirect_error(HOLIDAYS_PATH, &e.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// GET /admin/holidays/{id}/edit
#[instrument(skip(state))]
async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(flash): Query<Flash>,
) -> Result<Response> {
    match state.storage().holidays().get(&HolidayId::new(id)).await {
        Ok(holiday) => Ok(HolidayEditTemplate {
            current_path: HOLIDAYS_PATH.to_string(),
            holiday,
            flash,
        }
        .into_response()),
        Err(RepositoryError::NotFound) => {
            Ok(redirect_error(HOLIDAYS_PATH, "휴무일을 찾을 수 없습니다.").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /admin/holidays/{id}
#[instrument(skip(state))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<HolidayForm>,
) -> Result<Redirect> {
    let id = HolidayId::new(id);
    let back = format!("{HOLIDAYS_PATH}/{id}/edit");
    let date = match form.parsed_date() {
        Ok(date) => date,
        Err(e) => return Ok(redirect_error(&back, &e.to_string())),
    };
    let is_recurring_yearly = form.recurring();
    let patch = HolidayPatch {
        date: Some(date),
        reason: Some(form.reason),
        description: Some(form.description.unwrap_or_default()),
        is_recurring_yearly: Some(is_recurring_yearly),
    };

    match state.storage().holidays().update(&id, patch).await {
        Ok(holiday) => Ok(redirect_success(
            HOLIDAYS_PATH,
            &format!("{} 휴무일이 수정되었습니다.", holiday.reason),
        )),
        Err(RepositoryError::Validation(e)) => Ok(redirect_error(&back, &e.to_string())),
        Err(RepositoryError::NotFound) => Ok(redirect_error(HOLIDAYS_PATH, "휴무일을 찾을 수 없습니다.")),
        Err(e) => Err(e.into()),
    }
}

/// POST /admin/holidays/{id}/delete
#[instrument(skip(state))]
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    match state.storage().holidays().delete(&HolidayId::new(id)).await {
        Ok(holiday) => Ok(redirect_success(
            HOLIDAYS_PATH,
            &format!("{} 휴무일이 삭제되었습니다.", holiday.reason),
        )),
        Err(RepositoryError::NotFound) => Ok(redirect_error(HOLIDAYS_PATH, "휴무일을 찾을 수 없습니다.")),
        Err(e) => Err(e.into()),
    }
}
