use jwt_simple::prelude::*;
use thiserror::Error;

use super::claims::{IdentityClaim, TokenPayload};
use crate::config::{MAX_TOKEN_TTL_HOURS, TokenConfig};

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed token, or expired.
    #[error("Token rejected: {0}")]
    Rejected(String),

    #[error("Token is missing the {0} claim")]
    MissingClaim(&'static str),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// HS256 key used to issue and verify bearer tokens.
///
/// Verification is pure: no clock skew allowance, no I/O.
#[derive(Clone)]
pub struct TokenKeys {
    key: HS256Key,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            key: HS256Key::from_bytes(config.secret.as_bytes()),
            ttl: Duration::from_hours(config.ttl_hours.min(MAX_TOKEN_TTL_HOURS)),
        }
    }

    /// Issue a token for a user with the configured lifetime.
    pub fn issue(&self, user_id: i64, name: &str) -> Result<String, TokenError> {
        let payload = TokenPayload {
            name: name.to_string(),
            id: user_id,
        };
        let claims = Claims::with_custom_claims(payload, self.ttl);
        self.key
            .authenticate(claims)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, raw: &str) -> Result<IdentityClaim, TokenError> {
        let options = VerificationOptions {
            time_tolerance: Some(Duration::from_secs(0)),
            ..Default::default()
        };

        let claims = self
            .key
            .verify_token::<TokenPayload>(raw, Some(options))
            .map_err(|e| TokenError::Rejected(e.to_string()))?;

        let issued_at = claims.issued_at.ok_or(TokenError::MissingClaim("iat"))?;
        let expires_at = claims.expires_at.ok_or(TokenError::MissingClaim("exp"))?;

        Ok(IdentityClaim {
            user_id: claims.custom.id,
            name: claims.custom.name,
            issued_at: issued_at.as_secs() as i64,
            expires_at: expires_at.as_secs() as i64,
        })
    }
}
