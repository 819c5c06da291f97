/*
 * Responsibility
 * - bookings CRUD
 * - "serviceId" has an FK to services (CASCADE); an unknown service surfaces as
 *   RepoError::UnknownReference
 */
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    #[sqlx(rename = "bookingId")]
    pub booking_id: Uuid,
    #[sqlx(rename = "customerName")]
    pub customer_name: String,
    pub email: String,
    #[sqlx(rename = "serviceId")]
    pub service_id: i64,
    pub date: NaiveDate,
    pub price: f64,
    pub img: Option<String>,
    pub status: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewBooking<'a> {
    pub customer_name: &'a str,
    pub email: &'a str,
    pub service_id: i64,
    pub date: NaiveDate,
    pub price: f64,
    pub img: Option<&'a str>,
}

pub async fn list_by_email(db: &PgPool, email: &str) -> RepoResult<Vec<BookingRow>> {
    let rows = sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT
            "bookingId", "customerName", email, "serviceId", date, price, img, status, "createdAt"
        FROM bookings
        WHERE email = $1
        ORDER BY "createdAt" DESC
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, booking: &NewBooking<'_>) -> RepoResult<BookingRow> {
    let row = sqlx::query_as::<_, BookingRow>(
        r#"
        INSERT INTO bookings ("bookingId", "customerName", email, "serviceId", date, price, img)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING
            "bookingId", "customerName", email, "serviceId", date, price, img, status, "createdAt"
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(booking.customer_name)
    .bind(booking.email)
    .bind(booking.service_id)
    .bind(booking.date)
    .bind(booking.price)
    .bind(booking.img)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

/// Only `status` is mutable after creation.
pub async fn update_status(
    db: &PgPool,
    booking_id: Uuid,
    status: &str,
) -> RepoResult<Option<BookingRow>> {
    let row = sqlx::query_as::<_, BookingRow>(
        r#"
        UPDATE bookings
        SET status = $2
        WHERE "bookingId" = $1
        RETURNING
            "bookingId", "customerName", email, "serviceId", date, price, img, status, "createdAt"
        "#,
    )
    .bind(booking_id)
    .bind(status)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, booking_id: Uuid) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE "bookingId" = $1
        "#,
    )
    .bind(booking_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
