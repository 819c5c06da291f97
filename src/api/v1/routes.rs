/*
 * Responsibility
 * - v1 URL layout
 * - /health, /jwt and /services are public
 * - /bookings handlers take the `Authenticated` extractor, so the guard runs per handler
 *   instead of as a layer
 */
use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    bookings::{create_booking, delete_booking, list_bookings, update_booking},
    health::health,
    services::{get_service, list_services},
    token::issue_token,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/jwt", post(issue_token))
        .route("/services", get(list_services))
        .route("/services/{service_id}", get(get_service))
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{booking_id}",
            patch(update_booking).delete(delete_booking),
        )
}
