//! CORS policy for browser clients.
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config (comma-separated env var), WITHOUT credentials.
//!
//! Bearer tokens travel in the Authorization header, so cookies/credentials are never needed.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::AppEnv;
use crate::middleware::http::REQUEST_ID_HEADER;

/// Apply CORS policy to the given Router.
///
/// Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router, app_env: AppEnv, allowed_origins: &[String]) -> Router {
    let cors = if app_env.is_production() {
        // An empty allowlist allows no origin at all.
        let allowed: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new().allow_origin(allow_origin)
    } else {
        CorsLayer::new().allow_origin(Any)
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static(REQUEST_ID_HEADER),
    ])
    .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
