//! Per-client rate limiting for the search endpoints, using governor and
//! `tower_governor`.
//!
//! The page fires one fragment request per pause in typing, so the limit is
//! generous in bursts but stops scripted scraping of the sales history.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

use crate::error::{ApiError, AppError};

/// Proxy headers consulted for the client IP, most specific first.
const CLIENT_IP_HEADERS: [&str; 2] = ["x-forwarded-for", "x-real-ip"];

/// Key extractor that identifies clients by the IP reported by a reverse proxy,
/// falling back to the socket peer address when no proxy header is present.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProxyIpKeyExtractor;

impl KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        client_ip(req.headers())
            .or_else(|| {
                req.extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            })
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// First parseable client IP from the proxy headers.
///
/// For `X-Forwarded-For` that is the leftmost entry in the chain.
fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    CLIENT_IP_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    })
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create the rate limiter for the search page, its results fragment and
/// `/api/search`.
///
/// Configuration: one token replenished every 500ms, burst of 30.
///
/// # Panics
///
/// This function will not panic. `per_millisecond(500)` and `burst_size(30)`
/// are both non-zero, which is all `GovernorConfigBuilder` requires.
#[must_use]
pub fn search_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_millisecond(500)
        .burst_size(30)
        .finish()
        .expect("rate limiter config with per_millisecond(500) and burst_size(30) is valid");
    GovernorLayer::new(Arc::new(config))
}

/// Give rate limit rejections on `/api` the API's JSON error body.
///
/// Layered outside the limiter. The limiter's `Retry-After` style headers are kept.
pub async fn json_rate_limit_rejection(request: axum::extract::Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let (parts, _) = response.into_parts();
    let mut rejection = ApiError(AppError::RateLimited).into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rejection.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rejection
}
