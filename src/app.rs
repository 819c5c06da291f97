/*
 * Responsibility
 * - tracing / panic hook setup
 * - Load Config -> build dependencies (pool, id codec, token codec, access guard)
 * - Assemble the Router and apply middleware (security headers / CORS / HTTP)
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{AppEnv, Config},
    middleware,
    services::{auth::build_auth, id_codec::IdCodec},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,car_doctor=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        // Production: default hook, server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting car doctor API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, config.app_env, &config.cors_allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("failed to run migrations")?;
    tracing::info!("database ready");

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;

    // The secret lives inside the codec from here on; it is never re-read.
    let (tokens, guard) = build_auth(&config.auth);
    tracing::info!(
        token_ttl_seconds = tokens.default_ttl().as_secs(),
        "token codec ready"
    );

    Ok(AppState::new(db, id_codec, tokens, guard))
}

async fn banner() -> &'static str {
    "Doctor is running"
}

fn build_router(state: AppState, app_env: AppEnv, cors_allowed_origins: &[String]) -> Router {
    let router = Router::new()
        .route("/", get(banner))
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, app_env, cors_allowed_origins);
    middleware::http::apply(router)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{HeaderMap, Method, Request, StatusCode, header},
    };
    use chrono::{TimeDelta, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AuthConfig;
    use crate::services::auth::{Claims, TokenCodec};

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    const SECRET: &str = "test-secret";
    const HOUR: Duration = Duration::from_secs(3600);

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(&AuthConfig::new(secret, AuthConfig::DEFAULT_TOKEN_TTL, 0).unwrap())
    }

    fn state() -> AppState {
        let auth = AuthConfig::new(SECRET, AuthConfig::DEFAULT_TOKEN_TTL, 0).unwrap();
        let (tokens, guard) = build_auth(&auth);
        // Never connected: every request below is answered before a query would run.
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://car_doctor@localhost/car_doctor_test")
            .unwrap();
        let id_codec = IdCodec::new(10, ALPHABET).unwrap();

        AppState::new(db, id_codec, tokens, guard)
    }

    fn app() -> Router {
        build_router(state(), AppEnv::Development, &[])
    }

    fn token_for(email: &str) -> String {
        codec(SECRET)
            .issue(&Claims::new().with("email", email), HOUR)
            .unwrap()
            .into_string()
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, bytes.to_vec())
    }

    async fn send_json(req: Request<Body>) -> (StatusCode, Value) {
        let (status, _, bytes) = send(req).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assert_error_body(body: &Value, message: &str) {
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], message);
    }

    #[tokio::test]
    async fn root_reports_running() {
        let (status, headers, bytes) = send(request(Method::GET, "/", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"Doctor is running");
        assert!(headers.contains_key("x-request-id"));
        assert_eq!(headers["x-content-type-options"], "nosniff");
    }

    #[tokio::test]
    async fn health_is_public() {
        let (status, body) = send_json(request(Method::GET, "/api/v1/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn issued_token_carries_the_posted_claims() {
        let claims = json!({"email": "a@x.com", "name": "Ann"});
        let (status, body) = send_json(request(
            Method::POST,
            "/api/v1/jwt",
            None,
            Some(claims.clone()),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "Bearer");
        assert_eq!(body["expires_in"], 3600);

        let token = body["token"].as_str().unwrap();
        let verified = codec(SECRET).verify(token).unwrap();
        assert_eq!(verified, serde_json::from_value::<Claims>(claims).unwrap());
    }

    #[tokio::test]
    async fn issuance_rejects_codec_owned_claims() {
        let (status, body) = send_json(request(
            Method::POST,
            "/api/v1/jwt",
            None,
            Some(json!({"email": "a@x.com", "exp": 4_102_444_800_i64})),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn listing_bookings_without_a_token_is_unauthorized() {
        let (status, body) = send_json(request(
            Method::GET,
            "/api/v1/bookings?email=a@x.com",
            None,
            None,
        ))
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error_body(&body, "Unauthorized access");
    }

    #[tokio::test]
    async fn listing_someone_elses_bookings_is_forbidden() {
        let token = token_for("a@x.com");
        let (status, body) = send_json(request(
            Method::GET,
            "/api/v1/bookings?email=b@x.com",
            Some(&token),
            None,
        ))
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_error_body(&body, "Forbidden access");
    }

    #[tokio::test]
    async fn owner_key_comparison_is_case_sensitive() {
        let token = token_for("a@x.com");
        let (status, _) = send_json(request(
            Method::GET,
            "/api/v1/bookings?email=A@x.com",
            Some(&token),
            None,
        ))
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn listing_without_an_owner_key_is_forbidden() {
        let token = token_for("a@x.com");
        let (status, body) =
            send_json(request(Method::GET, "/api/v1/bookings", Some(&token), None)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_error_body(&body, "Forbidden access");
    }

    #[tokio::test]
    async fn token_from_another_secret_is_unauthorized() {
        let token = codec("wrong-secret")
            .issue(&Claims::new().with("email", "a@x.com"), HOUR)
            .unwrap()
            .into_string();
        let (status, body) = send_json(request(
            Method::GET,
            "/api/v1/bookings?email=a@x.com",
            Some(&token),
            None,
        ))
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error_body(&body, "Unauthorized access");
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let token = codec(SECRET)
            .issue_at(
                &Claims::new().with("email", "a@x.com"),
                HOUR,
                Utc::now() - TimeDelta::hours(2),
            )
            .unwrap()
            .into_string();
        let (status, _) = send_json(request(
            Method::GET,
            "/api/v1/bookings?email=a@x.com",
            Some(&token),
            None,
        ))
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn booking_mutations_require_a_token() {
        let id = "5f0c8a52-7a4e-4b8f-9d0e-3c2a1b4d6e7f";
        let uri = format!("/api/v1/bookings/{id}");

        let (status, _) = send_json(request(Method::DELETE, &uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send_json(request(
            Method::PATCH,
            &uri,
            None,
            Some(json!({"status": "confirm"})),
        ))
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send_json(request(
            Method::POST,
            "/api/v1/bookings",
            Some("not-a-jwt"),
            Some(json!({})),
        ))
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_booking_is_rejected_before_storage() {
        let token = token_for("a@x.com");
        let (status, body) = send_json(request(
            Method::POST,
            "/api/v1/bookings",
            Some(&token),
            Some(json!({
                "customer_name": "Ann",
                "email": "not-an-email",
                "service_id": "Uk8Lb3cX2a",
                "date": "2026-11-02",
                "price": 120.0,
            })),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error_body(&body, "email must be an email address");
    }

    #[tokio::test]
    async fn booking_missing_a_required_field_is_a_bad_request() {
        let token = token_for("a@x.com");
        let (status, body) = send_json(request(
            Method::POST,
            "/api/v1/bookings",
            Some(&token),
            Some(json!({
                "email": "a@x.com",
                "service_id": "x",
                "date": "2026-11-02",
                "price": 1.0,
            })),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert!(body["message"].as_str().unwrap().contains("customer_name"));
    }

    #[tokio::test]
    async fn issuance_requires_a_claims_object() {
        let (status, body) = send_json(request(
            Method::POST,
            "/api/v1/jwt",
            None,
            Some(json!(["a@x.com"])),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn unparseable_booking_query_is_a_bad_request() {
        let token = token_for("a@x.com");
        let (status, body) = send_json(request(
            Method::GET,
            "/api/v1/bookings?email=a@x.com&email=b@x.com",
            Some(&token),
            None,
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn malformed_service_id_is_a_bad_request() {
        let (status, body) =
            send_json(request(Method::GET, "/api/v1/services/!!!", None, None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error_body(&body, "invalid id");
    }
}
