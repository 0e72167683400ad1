//! Integration tests for the Doughda storefront and admin.
//!
//! Both servers are started in-process on ephemeral ports over one shared
//! in-memory [`Storage`], so the tests need no database, Redis or network
//! services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p doughda-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `admin_auth` - Login, logout and the write gate
//! - `admin_products` - Product CRUD through the JSON API
//! - `admin_product_pages` - Multipart product forms, holiday forms and served uploads
//! - `admin_holidays` - Holidays and the holiday check
//! - `admin_store` - Store status and weekly hours
//! - `admin_upload` - Image upload validation
//! - `storefront` - Public pages and the read-only API

use std::net::SocketAddr;

use axum::Router;
use doughda_storage::Storage;
use reqwest::{Client, StatusCode};

/// Password configured for the admin under test.
pub const ADMIN_PASSWORD: &str = "sourdough-at-dawn";

/// Running admin and storefront servers sharing one store.
pub struct TestContext {
    pub client: Client,
    pub admin_url: String,
    pub storefront_url: String,
    pub storage: Storage,
}

impl TestContext {
    /// Start both servers with empty storage.
    pub async fn new() -> Self {
        let storage = Storage::in_memory();

        let admin_state = doughda_admin::state::AppState::new(
            doughda_admin::config::AdminConfig::for_tests(ADMIN_PASSWORD),
            storage.clone(),
        );
        let storefront_state = doughda_storefront::state::AppState::new(
            doughda_storefront::config::StorefrontConfig::for_tests(),
            storage.clone(),
        );

        let admin_url = serve(doughda_admin::app(admin_state)).await;
        let storefront_url = serve(doughda_storefront::app(storefront_state)).await;

        Self {
            client: client(),
            admin_url,
            storefront_url,
            storage,
        }
    }

    /// Start both servers and log the shared client in to the admin.
    pub async fn logged_in() -> Self {
        let ctx = Self::new().await;
        let resp = ctx
            .client
            .post(ctx.admin("/api/admin/login"))
            .json(&serde_json::json!({ "password": ADMIN_PASSWORD }))
            .send()
            .await
            .expect("Failed to log in");
        assert_eq!(resp.status(), StatusCode::OK);
        ctx
    }

    /// Absolute admin URL for `path`.
    #[must_use]
    pub fn admin(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// Absolute storefront URL for `path`.
    #[must_use]
    pub fn storefront(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }
}

/// A client that keeps cookies and does not follow redirects.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Serve `app` on an ephemeral local port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Test server error");
    });

    format!("http://{addr}")
}
