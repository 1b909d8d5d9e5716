/// Bearer token issuance and validation.
///
/// Tokens are JWTs signed with HS256 over a shared secret. The claims are
/// intentionally minimal: the subject identifier, a per-issuance nonce, the
/// issuer, and the issued-at/expiry timestamps. The admin flag is never
/// embedded; authorization re-resolves the live user record instead, so a
/// role downgrade does not wait out the token lifetime.
///
/// The time-to-live is fixed at issuance (`exp = iat + ttl`) and the codec
/// carries it as explicit state, supplied by configuration at construction.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use travellog_shared::auth::token::TokenCodec;
/// use uuid::Uuid;
///
/// let codec = TokenCodec::new(
///     "a-signing-secret-of-at-least-32-bytes",
///     "travellog",
///     Duration::minutes(30),
/// );
///
/// let user_id = Uuid::new_v4();
/// let token = codec.issue(user_id).unwrap();
/// assert_eq!(codec.decode(&token).unwrap().sub, user_id);
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error type for token operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Token expiry timestamp has passed
    #[error("token has expired")]
    Expired,

    /// Signature, issuer, or structure check failed
    #[error("token rejected: {0}")]
    Invalid(String),

    /// Failed to sign a new token
    #[error("failed to sign token: {0}")]
    Sign(String),
}

/// Claims carried by an issued token.
///
/// `jti` is a fresh random nonce per issuance, so two logins by the same
/// user never yield bit-identical tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - user id
    pub sub: Uuid,

    /// Per-issuance nonce
    pub jti: Uuid,

    /// Issuer, checked on decode
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiry (Unix timestamp), fixed at issuance
    pub exp: i64,
}

/// Issues and validates signed bearer tokens.
///
/// Secret, issuer, and time-to-live are all set at construction and
/// immutable afterwards; the codec is freely cloneable and safe to share
/// across concurrent requests.
#[derive(Clone)]
pub struct TokenCodec {
    secret: String,
    issuer: String,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Signs a new token asserting `user_id` as the subject.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id,
            jti: Uuid::new_v4(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Sign(e.to_string()))
    }

    /// Verifies signature, expiry, and issuer, and returns the claims.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;

        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })?;

        Ok(data.claims)
    }
}
