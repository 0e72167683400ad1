//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (reuse `x-request-id` or generate one)
//! 4. Security headers (CSP, frame denial, nosniff, HSTS over HTTPS)
//! 5. Session layer (tower-sessions, in-memory store, SameSite=Strict)
//! 6. Auth gates (admin pages redirect to login, API writes answer 401)
//! 7. Rate limiting on the login endpoints (governor, per client IP)

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{is_admin, log_in, log_out, require_admin_for_writes, require_admin_page};
pub use rate_limit::{ClientIpKeyExtractor, auth_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
