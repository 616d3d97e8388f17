//! Signed bearer token issuance and verification.
//!
//! One signing mechanism serves two token purposes: login sessions and
//! approval-review links. The purpose is part of the signed claims and is
//! checked on verification, so a token minted for one flow cannot be
//! redeemed in the other.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{CustodiaError, Result};

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// What a token authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// Authenticated API session.
    Session,
    /// One registration-review link.
    Approval,
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPurpose::Session => write!(f, "session"),
            TokenPurpose::Approval => write!(f, "approval"),
        }
    }
}

/// Signed token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Token purpose.
    pub purpose: TokenPurpose,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// Token ID (unique identifier).
    pub jti: String,
}

/// Issues and verifies signed, time-limited tokens.
///
/// Built once at startup from the configured signing secret and shared
/// across handlers.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the default 24 hour lifetime.
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL)
    }

    /// Create an issuer with a custom token lifetime.
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a signed token for the given user and purpose.
    pub fn issue(&self, user_id: i64, purpose: TokenPurpose) -> Result<String> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = TokenClaims {
            sub: user_id,
            purpose,
            iat: now,
            exp: now + self.ttl.as_secs(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| CustodiaError::Token(format!("failed to encode token: {e}")))
    }

    /// Verify a token and check that it was issued for the expected purpose.
    pub fn verify(&self, token: &str, expected: TokenPurpose) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("token validation failed: {}", e);
                CustodiaError::Token("invalid or expired token".to_string())
            })?;

        if data.claims.purpose != expected {
            return Err(CustodiaError::Token(format!(
                "token was not issued for {expected} use"
            )));
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish()
    }
}
