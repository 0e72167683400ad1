//! Image upload validation.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use doughda_integration_tests::TestContext;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

fn image_form(file_name: &str, bytes: Vec<u8>) -> Form {
    Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()))
}

#[tokio::test]
async fn test_upload_returns_url() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/api/upload"))
        .multipart(image_form("melon-bread.png", vec![0x89, b'P', b'N', b'G']))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["url"].as_str().unwrap().starts_with("/uploads/"));
}

#[tokio::test]
async fn test_upload_rejects_unsupported_extension() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/api/upload"))
        .multipart(image_form("menu.pdf", b"%PDF-1.7".to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_files_over_five_mib() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/api/upload"))
        .multipart(image_form("huge.jpg", vec![0; 5 * 1024 * 1024 + 1]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/api/upload"))
        .multipart(Form::new().text("note", "no file here"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_requires_login() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.admin("/api/upload"))
        .multipart(image_form("melon-bread.png", vec![1, 2, 3]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
