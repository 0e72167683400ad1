//! Public storefront pages and the read-only API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{Datelike, Duration, NaiveDate};
use doughda_core::{NewHoliday, NewProduct, Price, StoreStatus};
use doughda_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.storefront("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.storefront("/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_home_page_shows_products_and_status() {
    let ctx = TestContext::new().await;
    ctx.storage
        .products()
        .create(NewProduct {
            name: "Salt Bread".to_string(),
            price: Some(Price::won(3200)),
            ..NewProduct::default()
        })
        .await
        .unwrap();
    ctx.storage
        .store_status()
        .set(StoreStatus::closed(Some("16:00".to_string()), None))
        .await
        .unwrap();

    let resp = ctx.client.get(ctx.storefront("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Salt Bread"));
    assert!(body.contains("3,200원"));
    assert!(body.contains("16:00"));
}

/// The same month and day `years` earlier, stepping back a day for Feb 29.
fn years_before(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() - years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), date.day() - 1))
        .unwrap()
}

#[tokio::test]
async fn test_home_page_orders_upcoming_by_next_anniversary() {
    let ctx = TestContext::new().await;
    let today = chrono::Local::now().date_naive();
    for (reason, ahead, years) in [("Founders Day", 40, 20), ("Oven Service", 10, 10)] {
        ctx.storage
            .holidays()
            .create(NewHoliday {
                date: years_before(today + Duration::days(ahead), years),
                reason: reason.to_string(),
                description: None,
                is_recurring_yearly: true,
            })
            .await
            .unwrap();
    }

    let body = ctx
        .client
        .get(ctx.storefront("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let upcoming = &body[body.find("class=\"upcoming\"").unwrap()..];
    let sooner = upcoming.find("Oven Service").unwrap();
    let later = upcoming.find("Founders Day").unwrap();
    assert!(sooner < later);
}

#[tokio::test]
async fn test_home_page_accepts_month_param() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.storefront("/?month=2030-02"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("month=2030-01"));
    assert!(body.contains("month=2030-03"));
}

#[tokio::test]
async fn test_product_list_is_not_cached() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.storefront("/api/products"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["cache-control"], "no-store");
    let products: Vec<Value> = resp.json().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_storefront_api_is_read_only() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.storefront("/api/products"))
        .json(&serde_json::json!({ "name": "Baguette", "price": 4500 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_admin_changes_are_visible_on_storefront() {
    let ctx = TestContext::logged_in().await;

    ctx.client
        .post(ctx.admin("/api/products"))
        .json(&serde_json::json!({ "name": "Cream Bun", "price": 2800 }))
        .send()
        .await
        .unwrap();

    let products: Vec<Value> = ctx
        .client
        .get(ctx.storefront("/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Cream Bun");
}
