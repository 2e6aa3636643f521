//! Security headers middleware.
//!
//! Every response is locked down. The only third-party origin allowed is
//! unpkg, which serves the HTMX script for the search page.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// CSP for the search page and its fragments.
///
/// HTMX swaps in server-rendered HTML, so no inline script or style is needed.
const CSP: &str = "default-src 'none'; \
                   script-src 'self' https://unpkg.com; \
                   style-src 'self'; \
                   img-src 'self'; \
                   connect-src 'self'; \
                   frame-src 'none'; \
                   object-src 'none'; \
                   base-uri 'self'; \
                   form-action 'self'; \
                   frame-ancestors 'none'";

const PERMISSIONS_POLICY: &str = "camera=(), \
                                  display-capture=(), \
                                  geolocation=(), \
                                  microphone=(), \
                                  payment=(), \
                                  publickey-credentials-get=(), \
                                  usb=()";

/// Stylesheets are served under a content hash, so they never go stale.
const STATIC_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Search results change with every sale.
const DYNAMIC_CACHE_CONTROL: &str = "no-store, max-age=0";

/// Headers that are the same on every response.
const FIXED_HEADERS: [(&str, &str); 6] = [
    ("permissions-policy", PERMISSIONS_POLICY),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    // The HTMX script tag is loaded with crossorigin="anonymous" so this holds.
    ("cross-origin-embedder-policy", "require-corp"),
    ("x-dns-prefetch-control", "off"),
    ("x-permitted-cross-domain-policies", "none"),
];

/// Add security headers to all responses.
///
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: no-referrer`
/// - `Content-Security-Policy` (see [`CSP`])
/// - `Permissions-Policy` denying device features
/// - Cross-origin isolation policies
/// - `Cache-Control`: immutable for `/static`, `no-store` elsewhere
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let is_static = request.uri().path().starts_with("/static/");

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(CONTENT_SECURITY_POLICY, HeaderValue::from_static(CSP));

    for (name, value) in FIXED_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    let cache_control = if is_static {
        STATIC_CACHE_CONTROL
    } else {
        DYNAMIC_CACHE_CONTROL
    };
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache_control));

    response
}
