//! Access guard: bearer credential → verified identity → ownership check.
//!
//! Per request: Unauthenticated → CredentialExtracted → Authenticated → Authorized.
//! Every failed transition is terminal for that request.

use std::sync::Arc;

use axum::http::{HeaderMap, header};

use crate::services::auth::{claims::Claims, error::AuthError, token_codec::TokenCodec};

/// Claims recovered from a token whose signature and expiry were checked.
///
/// The only constructor is `AccessGuard::authorize`, so holding one proves verification ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    claims: Claims,
}

impl VerifiedIdentity {
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn email(&self) -> Option<&str> {
        self.claims.email()
    }
}

#[derive(Clone, Debug)]
pub struct AccessGuard {
    codec: Arc<TokenCodec>,
}

impl AccessGuard {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Authenticate a request from its headers.
    ///
    /// Codec failures are returned as-is (`InvalidSignature` / `Expired`).
    pub fn authorize(&self, headers: &HeaderMap) -> Result<VerifiedIdentity, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingCredential)?;
        let claims = self.codec.verify(token)?;

        Ok(VerifiedIdentity { claims })
    }

    /// Scope check for endpoints keyed by an owner attribute.
    ///
    /// Exact, case-sensitive comparison against the identity's email; no trimming.
    pub fn authorize_ownership(
        &self,
        identity: &VerifiedIdentity,
        requested_owner_key: &str,
    ) -> Result<(), AuthError> {
        match identity.email() {
            Some(email) if email == requested_owner_key => Ok(()),
            _ => Err(AuthError::Forbidden),
        }
    }
}

/// `Authorization: Bearer <token>` → `<token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
