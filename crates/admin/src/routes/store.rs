//! Store status and opening hours pages.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
};
use chrono::NaiveTime;
use doughda_core::{StoreHours, StoreStatus, ValidationError};
use doughda_storage::RepositoryError;
use serde::Deserialize;
use tracing::instrument;

use super::{Flash, checkbox, redirect_error, redirect_success};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

const STORE_PATH: &str = "/admin/store";

/// One weekday row on the hours form.
#[derive(Debug, Clone)]
pub struct HoursRow {
    pub day_of_week: u8,
    pub label: &'static str,
    pub open_time: String,
    pub close_time: String,
    pub is_open: bool,
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "store.html")]
pub struct StoreTemplate {
    pub current_path: String,
    pub status: StoreStatus,
    pub hours: Vec<HoursRow>,
    pub flash: Flash,
}

/// Close form input.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseForm {
    #[serde(default)]
    pub closed_at: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Build the store pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/store", get(show))
        .route("/admin/store/open", post(open))
        .route("/admin/store/close", post(close))
        .route("/admin/store/hours", post(save_hours))
}

const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Seven form rows, filling unset weekdays with closed placeholders.
fn hours_rows(stored: &[StoreHours]) -> Vec<HoursRow> {
    (0u8..7)
        .zip(WEEKDAY_LABELS)
        .map(|(day, label)| {
            stored.iter().find(|h| h.day_of_week == day).map_or_else(
                || HoursRow {
                    day_of_week: day,
                    label,
                    open_time: "10:00".to_string(),
                    close_time: "20:00".to_string(),
                    is_open: false,
                },
                |h| HoursRow {
                    day_of_week: day,
                    label,
                    open_time: h.open_label(),
                    close_time: h.close_label(),
                    is_open: h.is_open,
                },
            )
        })
        .collect()
}

/// Parse the hours form (`open_<d>`, `close_<d>`, `isOpen_<d>` for d in 0..7).
fn parse_hours(fields: &HashMap<String, String>) -> std::result::Result<Vec<StoreHours>, ValidationError> {
    let time = |key: String| {
        let raw = fields.get(&key).map_or("", String::as_str).trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .map_err(|_| ValidationError::invalid("time", format!("{raw:?} is not HH:MM")))
    };

    (0u8..7)
        .map(|day| -> std::result::Result<StoreHours, ValidationError> {
            Ok(StoreHours {
                day_of_week: day,
                open_time: time(format!("open_{day}"))?,
                close_time: time(format!("close_{day}"))?,
                is_open: checkbox(fields.get(&format!("isOpen_{day}")).map(String::as_str)),
            })
        })
        .collect()
}

/// GET /admin/store
#[instrument(skip(state))]
async fn show(State(state): State<AppState>, Query(flash): Query<Flash>) -> Result<StoreTemplate> {
    let storage = state.storage();
    Ok(StoreTemplate {
        current_path: STORE_PATH.to_string(),
        status: storage.store_status().get().await?,
        hours: hours_rows(&storage.store_hours().list().await?),
        flash,
    })
}

/// Open the store. Writes a plain `{"isOpen": true}` record.
///
/// POST /admin/store/open
#[instrument(skip(state))]
async fn open(State(state): State<AppState>) -> Result<Redirect> {
    state.storage().store_status().set(StoreStatus::open()).await?;
    Ok(redirect_success(STORE_PATH, "영업을 시작했습니다."))
}

/// Close the store with optional closing time and reason.
///
/// POST /admin/store/close
#[instrument(skip(state))]
async fn close(State(state): State<AppState>, Form(form): Form<CloseForm>) -> Result<Redirect> {
    state
        .storage()
        .store_status()
        .set(StoreStatus::closed(form.closed_at, form.reason))
        .await?;
    Ok(redirect_success(STORE_PATH, "영업을 종료했습니다."))
}

/// Replace the weekly hours.
///
/// POST /admin/store/hours
#[instrument(skip_all)]
async fn save_hours(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect> {
    let rows = match parse_hours(&fields) {
        Ok(rows) => rows,
        Err(e) => return Ok(redirect_error(STORE_PATH, &e.to_string())),
    };
    match state.storage().store_hours().replace(rows).await {
        Ok(_) => Ok(redirect_success(STORE_PATH, "영업시간을 저장했습니다.")),
        Err(RepositoryError::Validation(e)) => Ok(redirect_error(STORE_PATH, &e.to_string())),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn full_week() -> Vec<(String, String)> {
        (0..7)
            .flat_map(|d| {
                [
                    (format!("open_{d}"), "10:00".to_string()),
                    (format!("close_{d}"), "19:30".to_string()),
                ]
            })
            .collect()
    }

    #[test]
    fn test_parse_hours_reads_checkboxes() {
        let mut fields: HashMap<String, String> = full_week().into_iter().collect();
        fields.insert("isOpen_2".to_string(), "on".to_string());

        let rows = parse_hours(&fields).unwrap();
        assert_eq!(rows.len(), 7);
        assert!(rows[2].is_open);
        assert!(!rows[0].is_open);
        assert_eq!(rows[2].close_label(), "19:30");
    }

    #[test]
    fn test_parse_hours_rejects_bad_time() {
        let fields = form(&[("open_0", "ten"), ("close_0", "20:00")]);
        assert!(matches!(
            parse_hours(&fields),
            Err(ValidationError::Invalid { field: "time", .. })
        ));
    }

    #[test]
    fn test_hours_rows_fill_missing_days() {
        let stored = vec![StoreHours {
            day_of_week: 3,
            open_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            is_open: true,
        }];
        let rows = hours_rows(&stored);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[3].open_time, "09:00");
        assert!(rows[3].is_open);
        assert!(!rows[0].is_open);
        assert_eq!(rows[6].label, "토");
    }
}
