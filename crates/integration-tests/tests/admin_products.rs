//! Product CRUD through the admin JSON API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use doughda_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn create(ctx: &TestContext, body: Value) -> Value {
    let resp = ctx
        .client
        .post(ctx.admin("/api/products"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_create_list_and_get() {
    let ctx = TestContext::logged_in().await;

    let created = create(
        &ctx,
        json!({ "name": "Sourdough", "description": "Country loaf", "price": 7500 }),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Sourdough");
    assert_eq!(created["price"], 7500);
    assert_eq!(created["isSoldOut"], false);

    let resp = ctx.client.get(ctx.admin("/api/products")).send().await.unwrap();
    assert_eq!(resp.headers()["cache-control"], "no-store");
    let list: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(list.len(), 1);

    let resp = ctx
        .client
        .get(ctx.admin(&format!("/api/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_requires_name_and_price() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/api/products"))
        .json(&json!({ "price": 3000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = ctx
        .client
        .post(ctx.admin("/api/products"))
        .json(&json!({ "name": "Croissant" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(ctx.storage.products().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_by_path_and_by_body() {
    let ctx = TestContext::logged_in().await;
    let created = create(&ctx, json!({ "name": "Croissant", "price": 3500 })).await;
    let id = created["id"].as_str().unwrap().to_string();

    let resp = ctx
        .client
        .patch(ctx.admin(&format!("/api/products/{id}")))
        .json(&json!({ "isSoldOut": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["isSoldOut"], true);
    assert_eq!(updated["name"], "Croissant");

    let resp = ctx
        .client
        .patch(ctx.admin("/api/products"))
        .json(&json!({ "id": id, "price": 3800 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["price"], 3800);
    assert_eq!(updated["isSoldOut"], true);

    let resp = ctx
        .client
        .patch(ctx.admin("/api/products"))
        .json(&json!({ "price": 3800 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_by_path_and_by_body() {
    let ctx = TestContext::logged_in().await;
    let first = create(&ctx, json!({ "name": "Bagel", "price": 2500 })).await;
    let second = create(&ctx, json!({ "name": "Scone", "price": 3000 })).await;

    let resp = ctx
        .client
        .delete(ctx.admin(&format!("/api/products/{}", first["id"].as_str().unwrap())))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));

    let resp = ctx
        .client
        .delete(ctx.admin("/api/products"))
        .json(&json!({ "id": second["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(ctx.storage.products().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .get(ctx.admin("/api/products/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ctx
        .client
        .patch(ctx.admin("/api/products/does-not-exist"))
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ctx
        .client
        .delete(ctx.admin("/api/products/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/api/products"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}
