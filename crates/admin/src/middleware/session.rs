//! Session middleware configuration for admin.
//!
//! Sessions live in an in-memory store owned by the session layer, so a
//! restart logs the operator out. Cookies are `HttpOnly`, `SameSite=Strict`
//! and `Secure` when the console is served over HTTPS.

use tower_sessions::{MemoryStore, SessionManagerLayer, cookie::SameSite};

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "doughda_admin_session";

/// Lifetime of an admin login in hours, fixed at login time.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Create the session layer with a fresh in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
