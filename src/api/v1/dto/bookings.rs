/*
 * Responsibility
 * - Bookings request/response DTOs
 * - validate() does shape checks only; ownership is the access guard's job
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MAX_STATUS_LEN: usize = 32;
const MAX_IMG_LEN: usize = 2048;

#[derive(Debug, Default, Deserialize)]
pub struct ListBookingsQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_name: String,
    pub email: String,
    pub service_id: String, // public (encoded) service id
    pub date: NaiveDate,
    pub price: f64,
    pub img: Option<String>,
}

impl CreateBookingRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.customer_name.trim().is_empty() {
            return Err("customer_name is required");
        }
        if !self.email.contains('@') {
            return Err("email must be an email address");
        }
        if self.service_id.trim().is_empty() {
            return Err("service_id is required");
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number");
        }
        if let Some(img) = &self.img
            && img.len() > MAX_IMG_LEN
        {
            return Err("img must be <= 2048 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub status: String,
}

impl UpdateBookingRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.status.trim().is_empty() {
            return Err("status cannot be empty");
        }
        if self.status.len() > MAX_STATUS_LEN {
            return Err("status must be <= 32 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub service_id: String, // encoded
    pub date: NaiveDate,
    pub price: f64,
    pub img: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> CreateBookingRequest {
        serde_json::from_value(serde_json::json!({
            "customer_name": "Ann",
            "email": "a@x.com",
            "service_id": "Uk8Lb3cX2a",
            "date": "2026-11-02",
            "price": 120.5,
        }))
        .unwrap()
    }

    #[test]
    fn well_formed_booking_passes() {
        let req = booking();
        assert_eq!(req.validate(), Ok(()));
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
        assert!(req.img.is_none());
    }

    #[test]
    fn booking_shape_is_checked() {
        let mut req = booking();
        req.customer_name = "  ".into();
        assert!(req.validate().is_err());

        let mut req = booking();
        req.email = "not-an-email".into();
        assert!(req.validate().is_err());

        let mut req = booking();
        req.price = -1.0;
        assert!(req.validate().is_err());

        let mut req = booking();
        req.price = f64::NAN;
        assert!(req.validate().is_err());

        let mut req = booking();
        req.service_id = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn status_update_is_bounded() {
        assert!(UpdateBookingRequest { status: "confirm".into() }.validate().is_ok());
        assert!(UpdateBookingRequest { status: " ".into() }.validate().is_err());
        assert!(UpdateBookingRequest { status: "x".repeat(33) }.validate().is_err());
    }
}
