use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::VerifiedIdentity;

/// Handler argument for protected routes.
///
/// Extraction runs `AccessGuard::authorize`; the handler body only runs with a verified
/// identity. Scoped handlers still call `AccessGuard::authorize_ownership` themselves.
pub struct Authenticated(pub VerifiedIdentity);

impl FromRequestParts<AppState> for Authenticated
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = state.guard.authorize(&parts.headers).map_err(|err| {
            // Expected client condition, not a server fault
            tracing::debug!(error = %err, "request rejected by access guard");
            AppError::from(err)
        })?;

        Ok(Authenticated(identity))
    }
}
