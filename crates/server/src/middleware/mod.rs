//! HTTP middleware stack for the server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (add unique ID to each request, recorded on the span)
//! 4. Security headers (CSP, frame and referrer policy, etc.)
//! 5. Rate limiting on search endpoints (governor), with JSON rejections on `/api`

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use rate_limit::{json_rate_limit_rejection, search_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
