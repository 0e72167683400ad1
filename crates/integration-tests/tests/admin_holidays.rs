//! Holidays and the holiday check.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use doughda_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn create(ctx: &TestContext, body: Value) -> Value {
    let resp = ctx
        .client
        .post(ctx.admin("/api/holidays"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_holidays_listed_by_date() {
    let ctx = TestContext::logged_in().await;
    create(&ctx, json!({ "date": "2030-03-01", "reason": "Independence Movement Day" })).await;
    create(&ctx, json!({ "date": "2030-01-01", "reason": "New Year" })).await;

    let list: Vec<Value> = ctx
        .client
        .get(ctx.admin("/api/holidays"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let dates: Vec<&str> = list.iter().map(|h| h["date"].as_str().unwrap()).collect();
    assert_eq!(dates, ["2030-01-01", "2030-03-01"]);
}

#[tokio::test]
async fn test_create_requires_reason() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/api/holidays"))
        .json(&json!({ "date": "2030-05-05", "reason": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_matches_recurring_holiday_in_any_year() {
    let ctx = TestContext::logged_in().await;
    create(
        &ctx,
        json!({ "date": "2024-12-25", "reason": "Christmas", "isRecurringYearly": true }),
    )
    .await;

    let check: Value = ctx
        .client
        .get(ctx.admin("/api/holidays/check?date=2031-12-25"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(check["date"], "2031-12-25");
    assert_eq!(check["isHoliday"], true);
    assert_eq!(check["holiday"]["reason"], "Christmas");

    let check: Value = ctx
        .client
        .get(ctx.storefront("/api/holidays/check?date=2031-12-24"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(check["isHoliday"], false);
    assert!(check.get("holiday").is_none());
}

#[tokio::test]
async fn test_check_rejects_bad_date() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.admin("/api/holidays/check?date=tomorrow"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = ctx
        .client
        .get(ctx.storefront("/api/holidays/check?date=tomorrow"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete() {
    let ctx = TestContext::logged_in().await;
    let created = create(&ctx, json!({ "date": "2030-06-06", "reason": "Memorial Day" })).await;
    let id = created["id"].as_str().unwrap().to_string();

    let resp = ctx
        .client
        .patch(ctx.admin(&format!("/api/holidays/{id}")))
        .json(&json!({ "description": "Closed all day" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["description"], "Closed all day");
    assert_eq!(updated["reason"], "Memorial Day");

    let resp = ctx
        .client
        .delete(ctx.admin("/api/holidays"))
        .json(&json!({ "id": id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .delete(ctx.admin(&format!("/api/holidays/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_holiday_page_form_creates_holiday() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/admin/holidays"))
        .form(&[
            ("date", "2030-10-09"),
            ("reason", "Hangul Day"),
            ("isRecurringYearly", "on"),
        ])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_redirection());

    let holidays = ctx.storage.holidays().list().await.unwrap();
    assert_eq!(holidays.len(), 1);
    assert!(holidays[0].is_recurring_yearly);

    let body = ctx
        .client
        .get(ctx.admin("/admin/holidays"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Hangul Day"));
}
