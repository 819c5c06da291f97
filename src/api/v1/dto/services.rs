/*
 * Responsibility
 * - Catalog query/response DTOs
 * - Ids leave the API sqids-encoded (the internal BIGINT is never exposed)
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ListServicesQuery {
    /// "asc" or "desc" (default)
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub id: String, // encoded
    pub title: String,
    pub price: f64,
    pub img: Option<String>,
    pub description: Option<String>,
}

/// Projection returned by `GET /services/{id}`.
#[derive(Debug, Serialize)]
pub struct ServiceSummary {
    pub id: String, // encoded
    pub title: String,
    pub price: f64,
    pub img: Option<String>,
}
