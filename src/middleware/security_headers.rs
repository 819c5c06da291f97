//! Security-related response headers, applied at the Router level.
//!
//! Responsibility:
//! - Clickjacking protection
//! - MIME sniffing protection
//! - Referrer leakage control (tokens never appear in URLs, but keep referrers off anyway)

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub fn apply(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("no-referrer"),
        ))
        // Responses may carry bearer tokens (POST /jwt)
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("cache-control"),
            HeaderValue::from_static("no-store"),
        ))
}
