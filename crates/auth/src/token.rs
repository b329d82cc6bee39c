use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::Claims;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token")]
    Invalid,
}

/// HS256 session token codec over a shared process secret.
///
/// A missing secret is a deployment misconfiguration: callers must fail
/// startup rather than fall back to a default (see `Config::from_env`).
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Encode and sign `claims` into an opaque bearer token.
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use noteforge_core::{Role, TenantId, UserId};

    fn test_claims(issued_at: chrono::DateTime<Utc>) -> Claims {
        Claims::new(
            UserId::new(),
            "user@acme.test",
            Role::Member,
            TenantId::new(),
            "acme",
            issued_at,
        )
    }

    #[test]
    fn issues_and_decodes_claims() {
        let codec = TokenCodec::new(b"test-secret");
        let claims = test_claims(Utc::now());

        let token = codec.issue(&claims).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn rejects_expired_token() {
        let codec = TokenCodec::new(b"test-secret");
        // Issued 25h ago: past the 24h TTL even with default leeway.
        let claims = test_claims(Utc::now() - Duration::hours(25));

        let token = codec.issue(&claims).unwrap();
        assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let codec = TokenCodec::new(b"test-secret");
        let other = TokenCodec::new(b"other-secret");

        let token = other.issue(&test_claims(Utc::now())).unwrap();
        assert_eq!(codec.decode(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn rejects_garbage_token() {
        let codec = TokenCodec::new(b"test-secret");
        assert_eq!(codec.decode("not-a-jwt"), Err(TokenError::Invalid));
        assert_eq!(codec.decode(""), Err(TokenError::Invalid));
    }
}
