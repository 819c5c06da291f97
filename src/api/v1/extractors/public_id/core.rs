/*
 * Responsibility
 * - Take the public id from the path and decode it into the internal BIGINT id
 * - Malformed ids are a 400 with the usual error body
 * - Generic over a tag type so each resource gets its own id type
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Clone, Copy)]
pub struct PublicId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PublicId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> FromRequestParts<AppState> for PublicId<T>
where
    T: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(public_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("invalid id"))?;
        let id = state.id_codec.decode(&public_id)?;
        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for PublicId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicId").field("id", &self.id).finish()
    }
}
