use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::Serialize;

use crate::config::AuthConfig;
use crate::services::auth::{
    claims::Claims,
    error::{AuthError, IssueError},
};

/// Registered claims owned by the codec. Callers cannot supply them and `verify` strips them.
const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

/// Signed compact JWS (`header.payload.signature`, base64url).
///
/// Only `TokenCodec` produces or parses this format.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bearer material; never print it
        f.debug_tuple("Token").field(&"..").finish()
    }
}

#[derive(Serialize)]
struct SignedPayload<'a> {
    #[serde(flatten)]
    claims: &'a Claims,
    iat: i64,
    exp: i64,
}

/// HS256 token issuer/verifier keyed by a single process-wide secret.
///
/// - Key material is not printable via Debug.
/// - Verification is pure (no I/O), so the codec is shared behind `Arc` without locking.
#[derive(Clone)]
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        // Claims are opaque; an `aud` supplied by the caller is payload, not a policy.
        validation.validate_aud = false;

        Self {
            header,
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
            default_ttl: config.token_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `claims`, valid for `ttl` from now.
    ///
    /// Claims are trusted as given; nothing checks them against an account.
    pub fn issue(&self, claims: &Claims, ttl: Duration) -> Result<Token, IssueError> {
        self.issue_at(claims, ttl, Utc::now())
    }

    /// Same as [`TokenCodec::issue`] with an explicit issuance instant.
    pub fn issue_at(
        &self,
        claims: &Claims,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<Token, IssueError> {
        if let Some(key) = RESERVED_CLAIMS.into_iter().find(|k| claims.contains_key(k)) {
            return Err(IssueError::ReservedClaim(key));
        }

        if ttl.as_secs() == 0 {
            return Err(IssueError::InvalidTtl);
        }
        let ttl_seconds = i64::try_from(ttl.as_secs()).map_err(|_| IssueError::InvalidTtl)?;

        let iat = now.timestamp();
        let exp = iat.checked_add(ttl_seconds).ok_or(IssueError::InvalidTtl)?;

        let payload = SignedPayload { claims, iat, exp };
        let token = jsonwebtoken::encode(&self.header, &payload, &self.encoding_key)?;

        Ok(Token(token))
    }

    /// Verify signature then expiry, and return the claims exactly as issued.
    ///
    /// A token failing both checks reports `InvalidSignature`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidSignature,
            })?;

        let mut claims = data.claims;
        for key in RESERVED_CLAIMS {
            claims.remove(key);
        }

        Ok(claims)
    }
}
