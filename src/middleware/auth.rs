//! Auth extractors: the declarative side of the access policy gate.
//!
//! A handler states its minimum tier by taking `AuthUser` or `AdminUser` as
//! an argument; both funnel through `policy::authorize`, so the evaluation
//! order and error mapping live in one place. Public endpoints take neither.

use axum::http::header::AUTHORIZATION;

use crate::auth::policy::{self, Tier};
use crate::auth::Claims;
use crate::error::AppError;
use crate::handlers::AppState;

const BEARER_PREFIX: &str = "Bearer ";

fn bearer_token(parts: &axum::http::request::Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
}

/// Extractor: verified claims of any authenticated caller.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = policy::authorize(state.jwt_secret(), bearer_token(parts), Tier::User)?;
        Ok(AuthUser(claims))
    }
}

/// Extractor: verified claims of an admin caller.
#[derive(Clone, Debug)]
pub struct AdminUser(pub Claims);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = policy::authorize(state.jwt_secret(), bearer_token(parts), Tier::Admin)?;
        Ok(AdminUser(claims))
    }
}
