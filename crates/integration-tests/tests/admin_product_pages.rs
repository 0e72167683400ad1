//! Product and holiday management pages driven through their HTML forms.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use doughda_core::{NewHoliday, NewProduct, Price, Product};
use doughda_integration_tests::TestContext;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode, header};
use serde_json::{Value, json};

fn product_form(name: &str, price: &str) -> Form {
    Form::new()
        .text("name", name.to_string())
        .text("description", "Slow fermented")
        .text("price", price.to_string())
}

fn with_image(form: Form, file_name: &str) -> Form {
    form.part(
        "image",
        Part::bytes(vec![0x89, b'P', b'N', b'G']).file_name(file_name.to_string()),
    )
}

fn location(resp: &Response) -> String {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    resp.headers()[header::LOCATION].to_str().unwrap().to_string()
}

async fn post_form(ctx: &TestContext, path: &str, form: Form) -> Response {
    ctx.client
        .post(ctx.admin(path))
        .multipart(form)
        .send()
        .await
        .unwrap()
}

async fn only_product(ctx: &TestContext) -> Product {
    let mut products = ctx.storage.products().list().await.unwrap();
    assert_eq!(products.len(), 1);
    products.remove(0)
}

async fn asset_exists(ctx: &TestContext, url: &str) -> bool {
    ctx.storage.assets().read(url).await.is_some()
}

async fn upload(ctx: &TestContext, file_name: &str) -> String {
    let form = Form::new().part(
        "file",
        Part::bytes(vec![0xFF, 0xD8, 0xFF]).file_name(file_name.to_string()),
    );
    let body: Value = ctx
        .client
        .post(ctx.admin("/api/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["url"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_with_image_stores_product_and_asset() {
    let ctx = TestContext::logged_in().await;

    let resp = post_form(
        &ctx,
        "/admin/products",
        with_image(product_form("Country Loaf", "6500"), "loaf.png"),
    )
    .await;
    assert!(location(&resp).starts_with("/admin/products?success="));

    let product = only_product(&ctx).await;
    assert_eq!(product.name, "Country Loaf");
    assert_eq!(product.price, Price::won(6500));
    let image = product.image.unwrap();
    assert!(image.starts_with("/uploads/"));
    assert!(asset_exists(&ctx, &image).await);
}

#[tokio::test]
async fn test_create_with_blank_name_redirects_back_with_error() {
    let ctx = TestContext::logged_in().await;

    let resp = post_form(
        &ctx,
        "/admin/products",
        with_image(product_form("  ", "6500"), "loaf.png"),
    )
    .await;
    assert!(location(&resp).starts_with("/admin/products/new?error="));
    assert!(ctx.storage.products().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_bad_image_stores_nothing() {
    let ctx = TestContext::logged_in().await;

    let resp = post_form(
        &ctx,
        "/admin/products",
        with_image(product_form("Country Loaf", "6500"), "loaf.exe"),
    )
    .await;
    assert!(location(&resp).starts_with("/admin/products/new?error="));
    assert!(ctx.storage.products().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_with_new_image_removes_old_asset() {
    let ctx = TestContext::logged_in().await;
    post_form(
        &ctx,
        "/admin/products",
        with_image(product_form("Country Loaf", "6500"), "old.png"),
    )
    .await;
    let before = only_product(&ctx).await;
    let old_image = before.image.clone().unwrap();

    let resp = post_form(
        &ctx,
        &format!("/admin/products/{}", before.id),
        with_image(product_form("Country Loaf", "7000"), "new.png"),
    )
    .await;
    assert!(location(&resp).starts_with("/admin/products?success="));

    let after = only_product(&ctx).await;
    let new_image = after.image.unwrap();
    assert_ne!(new_image, old_image);
    assert_eq!(after.price, Price::won(7000));
    assert!(asset_exists(&ctx, &new_image).await);
    assert!(!asset_exists(&ctx, &old_image).await);
}

#[tokio::test]
async fn test_update_remove_image_clears_field_and_asset() {
    let ctx = TestContext::logged_in().await;
    post_form(
        &ctx,
        "/admin/products",
        with_image(product_form("Country Loaf", "6500"), "loaf.png"),
    )
    .await;
    let before = only_product(&ctx).await;
    let image = before.image.clone().unwrap();

    let resp = post_form(
        &ctx,
        &format!("/admin/products/{}", before.id),
        product_form("Country Loaf", "6500").text("removeImage", "on"),
    )
    .await;
    assert!(location(&resp).starts_with("/admin/products?success="));

    assert_eq!(only_product(&ctx).await.image, None);
    assert!(!asset_exists(&ctx, &image).await);
}

#[tokio::test]
async fn test_update_with_bad_price_keeps_product() {
    let ctx = TestContext::logged_in().await;
    post_form(&ctx, "/admin/products", product_form("Country Loaf", "6500")).await;
    let before = only_product(&ctx).await;

    let resp = post_form(
        &ctx,
        &format!("/admin/products/{}", before.id),
        product_form("Country Loaf", "cheap"),
    )
    .await;
    assert_eq!(
        location(&resp).split('?').next().unwrap(),
        format!("/admin/products/{}/edit", before.id)
    );
    assert_eq!(only_product(&ctx).await.price, Price::won(6500));
}

#[tokio::test]
async fn test_update_unknown_product_redirects_to_list() {
    let ctx = TestContext::logged_in().await;

    let resp = post_form(
        &ctx,
        "/admin/products/does-not-exist",
        with_image(product_form("Ghost", "1000"), "ghost.png"),
    )
    .await;
    assert!(location(&resp).starts_with("/admin/products?error="));
}

#[tokio::test]
async fn test_sold_out_toggle_and_delete() {
    let ctx = TestContext::logged_in().await;
    let product = ctx
        .storage
        .products()
        .create(NewProduct {
            name: "Melon Bread".to_string(),
            description: None,
            price: Some(Price::won(3000)),
            image: None,
            is_sold_out: false,
        })
        .await
        .unwrap();

    let resp = ctx
        .client
        .post(ctx.admin(&format!("/admin/products/{}/sold-out", product.id)))
        .send()
        .await
        .unwrap();
    assert!(location(&resp).starts_with("/admin/products?success="));
    assert!(only_product(&ctx).await.is_sold_out);

    let resp = ctx
        .client
        .post(ctx.admin(&format!("/admin/products/{}/delete", product.id)))
        .send()
        .await
        .unwrap();
    assert!(location(&resp).starts_with("/admin/products?success="));
    assert!(ctx.storage.products().list().await.unwrap().is_empty());

    let resp = ctx
        .client
        .post(ctx.admin(&format!("/admin/products/{}/delete", product.id)))
        .send()
        .await
        .unwrap();
    assert!(location(&resp).starts_with("/admin/products?error="));
}

#[tokio::test]
async fn test_edit_page_renders_product() {
    let ctx = TestContext::logged_in().await;
    post_form(&ctx, "/admin/products", product_form("Country Loaf", "6500")).await;
    let product = only_product(&ctx).await;

    let resp = ctx
        .client
        .get(ctx.admin(&format!("/admin/products/{}/edit", product.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Country Loaf"));
}

#[tokio::test]
async fn test_api_image_replace_removes_old_asset() {
    let ctx = TestContext::logged_in().await;
    let old_image = upload(&ctx, "old.jpg").await;
    let created: Value = ctx
        .client
        .post(ctx.admin("/api/products"))
        .json(&json!({ "name": "Baguette", "price": 4000, "image": old_image }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let new_image = upload(&ctx, "new.jpg").await;
    let resp = ctx
        .client
        .patch(ctx.admin(&format!("/api/products/{}", created["id"].as_str().unwrap())))
        .json(&json!({ "image": new_image }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(!asset_exists(&ctx, &old_image).await);
    assert!(asset_exists(&ctx, &new_image).await);
}

#[tokio::test]
async fn test_memory_uploads_are_served() {
    let ctx = TestContext::logged_in().await;
    let image = upload(&ctx, "bun.jpg").await;

    for url in [ctx.admin(&image), ctx.storefront(&image)] {
        let resp = ctx.client.get(url).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(resp.bytes().await.unwrap().as_ref(), [0xFF, 0xD8, 0xFF]);
    }

    let missing = ctx
        .client
        .get(ctx.storefront("/uploads/0-missing.jpg"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_holiday_edit_and_delete_pages() {
    let ctx = TestContext::logged_in().await;
    let holiday = ctx
        .storage
        .holidays()
        .create(NewHoliday {
            date: "2030-10-09".parse().unwrap(),
            reason: "Hangul Day".to_string(),
            description: None,
            is_recurring_yearly: false,
        })
        .await
        .unwrap();

    let resp = ctx
        .client
        .post(ctx.admin(&format!("/admin/holidays/{}", holiday.id)))
        .form(&[
            ("date", "2030-10-10"),
            ("reason", "Hangul Day (observed)"),
            ("description", "Closed for the long weekend"),
            ("isRecurringYearly", "on"),
        ])
        .send()
        .await
        .unwrap();
    assert!(location(&resp).starts_with("/admin/holidays?success="));

    let updated = ctx.storage.holidays().get(&holiday.id).await.unwrap();
    assert_eq!(updated.date.to_string(), "2030-10-10");
    assert_eq!(updated.reason, "Hangul Day (observed)");
    assert!(updated.is_recurring_yearly);

    let resp = ctx
        .client
        .post(ctx.admin(&format!("/admin/holidays/{}", holiday.id)))
        .form(&[("date", "2030-10-10"), ("reason", "  ")])
        .send()
        .await
        .unwrap();
    assert!(location(&resp).starts_with(&format!("/admin/holidays/{}/edit?error=", holiday.id)));

    let resp = ctx
        .client
        .post(ctx.admin(&format!("/admin/holidays/{}", holiday.id)))
        .form(&[("date", "tomorrow"), ("reason", "Hangul Day")])
        .send()
        .await
        .unwrap();
    assert!(location(&resp).starts_with(&format!("/admin/holidays/{}/edit?error=", holiday.id)));

    let resp = ctx
        .client
        .post(ctx.admin(&format!("/admin/holidays/{}/delete", holiday.id)))
        .send()
        .await
        .unwrap();
    assert!(location(&resp).starts_with("/admin/holidays?success="));
    assert!(ctx.storage.holidays().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_holiday_create_with_blank_date_redirects_with_error() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .client
        .post(ctx.admin("/admin/holidays"))
        .form(&[("date", ""), ("reason", "Mystery")])
        .send()
        .await
        .unwrap();
    assert!(location(&resp).starts_with("/admin/holidays?error="));
    assert!(ctx.storage.holidays().list().await.unwrap().is_empty());
}
