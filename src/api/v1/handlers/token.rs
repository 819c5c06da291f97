/*
 * Responsibility
 * - POST /jwt: sign whatever claims the caller sends
 * - No account lookup happens before issuance
 */
use axum::{Json, extract::State};

use crate::api::v1::{dto::token::TokenResponse, extractors::ValidatedJson};
use crate::error::AppError;
use crate::services::auth::Claims;
use crate::state::AppState;

pub async fn issue_token(
    State(state): State<AppState>,
    ValidatedJson(claims): ValidatedJson<Claims>,
) -> Result<Json<TokenResponse>, AppError> {
    let ttl = state.tokens.default_ttl();
    let token = state.tokens.issue(&claims, ttl)?;

    tracing::debug!(
        claim_count = claims.attribute_count(),
        expires_in = ttl.as_secs(),
        "issued access token"
    );

    Ok(Json(TokenResponse {
        token: token.into_string(),
        token_type: "Bearer",
        expires_in: ttl.as_secs(),
    }))
}
