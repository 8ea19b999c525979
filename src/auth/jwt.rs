//! Signed session tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::{Identity, Role};
use crate::errors::Result;

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub id: i64,
    /// Account kind
    pub role: Role,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(identity: Identity, validity: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: identity.id,
            role: identity.role,
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        }
    }
}

/// Signing and verification keys derived from the shared secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl TokenKeys {
    #[must_use]
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validity,
        }
    }

    /// Signs a token for `identity` valid for the configured lifetime.
    pub fn issue(&self, identity: Identity) -> Result<String> {
        self.encode(&Claims::new(identity, self.validity))
    }

    /// Signs arbitrary claims. Mostly useful for tests that need expired tokens.
    pub fn encode(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(Into::into)
    }

    /// Checks signature and expiry; returns the claims on success.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(b"test-secret", Duration::hours(1))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let keys = keys();
        let token = keys.issue(Identity::admin(7)).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = keys().issue(Identity::user(1)).unwrap();
        let other = TokenKeys::new(b"another-secret", Duration::hours(1));

        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let keys = keys();
        // Well past the default leeway
        let claims = Claims::new(Identity::user(1), Duration::hours(-2));
        let token = keys.encode(&claims).unwrap();

        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(keys().verify("not-a-token").is_err());
        assert!(keys().verify("").is_err());
    }
}
