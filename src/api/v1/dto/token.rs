use serde::Serialize;

/// Response body for `POST /jwt`. The request body is the claims object itself.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
}
