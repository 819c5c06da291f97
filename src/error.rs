/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse (HTTP status + `{ "error": true, "message": ... }` body)
 * - Converts auth / repo / id codec errors into one shape
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::{AuthError, IssueError};
use crate::services::id_codec::IdCodecError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized access")]
    Unauthorized,
    #[error("Forbidden access")]
    Forbidden,
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: true,
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            // The caller has to obtain a new token for all of these
            AuthError::MissingCredential | AuthError::InvalidSignature | AuthError::Expired => {
                AppError::Unauthorized
            }
            AuthError::Forbidden => AppError::Forbidden,
        }
    }
}

impl From<IssueError> for AppError {
    fn from(e: IssueError) -> Self {
        match e {
            IssueError::ReservedClaim(_) => AppError::bad_request(e.to_string()),
            IssueError::InvalidTtl | IssueError::Signing(_) => {
                tracing::error!(error = %e, "failed to issue access token");
                AppError::Internal
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::UnknownReference => AppError::bad_request("referenced record does not exist"),
            RepoError::Db(e) => {
                tracing::error!(error = %e, "database error");
                AppError::Internal
            }
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /services/{id})
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::bad_request("invalid id")
            }

            // Server-side configuration or programming errors
            _ => {
                tracing::error!(error = %e, "id codec failure");
                AppError::Internal
            }
        }
    }
}
