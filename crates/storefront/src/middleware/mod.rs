//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (reuse `x-request-id` or generate one)
//! 4. Security headers (CSP, frame denial, nosniff)
//! 5. Rate limiting on `/api` (governor, per client IP)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use rate_limit::{ClientIpKeyExtractor, api_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
