/*
 * Responsibility
 * - /bookings handlers; every route here requires an authenticated caller
 * - GET /bookings is scoped by ?email= and additionally runs the ownership check
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::bookings::{
            BookingResponse, CreateBookingRequest, ListBookingsQuery, UpdateBookingRequest,
        },
        extractors::{Authenticated, ValidatedJson, ValidatedQuery},
    },
    error::AppError,
    repos::booking_repo::{self, BookingRow, NewBooking},
    services::auth::AuthError,
    state::AppState,
};

fn row_to_response(state: &AppState, row: BookingRow) -> Result<BookingResponse, AppError> {
    Ok(BookingResponse {
        id: row.booking_id,
        customer_name: row.customer_name,
        email: row.email,
        service_id: state.id_codec.encode(row.service_id)?,
        date: row.date,
        price: row.price,
        img: row.img,
        status: row.status,
        created_at: row.created_at,
    })
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    ValidatedQuery(query): ValidatedQuery<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    // Without an owner key there is no scope the caller could own
    let owner = query.email.as_deref().ok_or(AuthError::Forbidden)?;
    if let Err(err) = state.guard.authorize_ownership(&identity, owner) {
        tracing::debug!(error = %err, "booking list outside caller's scope");
        return Err(err.into());
    }

    let rows = booking_repo::list_by_email(&state.db, owner).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_booking(
    State(state): State<AppState>,
    _auth: Authenticated,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let service_id = state.id_codec.decode(&req.service_id)?;
    let booking = NewBooking {
        customer_name: req.customer_name.trim(),
        email: &req.email,
        service_id,
        date: req.date,
        price: req.price,
        img: req.img.as_deref(),
    };

    let row = booking_repo::create(&state.db, &booking).await?;
    tracing::info!(booking_id = %row.booking_id, "booking created");

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn update_booking(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(booking_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = booking_repo::update_status(&state.db, booking_id, req.status.trim())
        .await?
        .ok_or(AppError::not_found("booking"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(booking_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if booking_repo::delete(&state.db, booking_id).await? {
        tracing::info!(booking_id = %booking_id, "booking deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("booking"))
    }
}
