//! JWT issue and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Claim set embedded in every access token. Reconstructed from the signed
/// token on each request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username.
    pub sub: String,
    /// Admin flag. Tokens minted before the flag existed decode as non-admin.
    #[serde(default)]
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Token issuer and verifier around a process-wide symmetric secret.
///
/// Only HS256 is accepted on verification; a token whose header names any
/// other algorithm is rejected outright.
#[derive(Clone)]
pub struct JwtSecret {
    secret: String,
    ttl: Duration,
}

impl JwtSecret {
    pub fn new(secret: String, ttl_secs: i64) -> Self {
        Self {
            secret,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Sign a token for `subject` with the given admin flag, expiring after
    /// the configured TTL.
    pub fn issue(&self, subject: &str, admin: bool) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            admin,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("jwt encode: {}", e)))?;
        Ok(token)
    }

    /// Validate structure, signature, algorithm, and expiry; return the
    /// claim set. Every failure collapses into `InvalidToken` so callers
    /// cannot distinguish why a presented token was bad.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is a hard boundary, no grace window.
        validation.leeway = 0;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(data.claims)
    }
}
