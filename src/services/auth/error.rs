use thiserror::Error;

/// Why a request was refused by the access-control layer.
///
/// All variants are expected client conditions: terminal for the request, never retried, and
/// not server faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer <token>` header was presented.
    #[error("missing credential")]
    MissingCredential,

    /// The token is malformed or its signature does not match the shared secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token is well-signed but past its expiration instant.
    #[error("token expired")]
    Expired,

    /// The credential is valid but does not own the requested scope.
    #[error("forbidden")]
    Forbidden,
}

/// Issuance failures. These happen before any token exists.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("claim '{0}' is managed by the token codec and cannot be supplied")]
    ReservedClaim(&'static str),

    #[error("token ttl must be positive and representable")]
    InvalidTtl,

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
