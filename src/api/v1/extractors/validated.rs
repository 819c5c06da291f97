/*
 * Responsibility
 * - Json / Query wrappers whose rejections use the AppError shape
 *   (400 + `{ "error": true, "message": ... }`) instead of axum's plain-text 4xx
 * - No validation beyond deserialization; DTOs keep their own validate()
 */
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor mapping parse failures to `AppError::BadRequest`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                Err(AppError::bad_request(rejection.body_text()))
            }
        }
    }
}

/// Query string extractor mapping parse failures to `AppError::BadRequest`.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected query string");
                Err(AppError::bad_request(rejection.body_text()))
            }
        }
    }
}
