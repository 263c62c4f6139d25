//! Access policy gate: per-request tier evaluation.
//!
//! Each request is classified as Anonymous, User, or Admin from scratch; no
//! session state survives between requests.

use crate::auth::jwt::{Claims, JwtSecret};
use crate::error::{AppError, AppResult};

/// Privilege tiers, totally ordered. An endpoint declares the minimum tier
/// it requires and the gate compares ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Anonymous,
    User,
    Admin,
}

impl Claims {
    /// The tier a verified claim set grants.
    pub fn tier(&self) -> Tier {
        if self.admin {
            Tier::Admin
        } else {
            Tier::User
        }
    }
}

/// Central gate check. Evaluation order, short-circuiting on first failure:
/// no token presented, a token that fails verification, then a verified tier
/// below the endpoint minimum. Each step maps to its own error.
pub fn authorize(
    jwt: &JwtSecret,
    bearer: Option<&str>,
    min_tier: Tier,
) -> AppResult<Claims> {
    let token = bearer.ok_or(AppError::MissingToken)?;
    let claims = jwt.verify(token)?;
    if claims.tier() < min_tier {
        return Err(AppError::InsufficientPrivilege);
    }
    Ok(claims)
}
