//! HTTP handlers: protected resources, profile, and health.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::json;

use crate::auth::JwtSecret;
use crate::db::{user_find_by_username, DbPool};
use crate::error::AppError;
use crate::middleware::{AdminUser, AuthUser};

/// Shared application state, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub jwt_secret: JwtSecret,
}

impl AppState {
    pub fn db(&self) -> &DbPool {
        &self.db
    }
    pub fn jwt_secret(&self) -> &JwtSecret {
        &self.jwt_secret
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub admin: bool,
}

/// GET /me — profile of the calling user.
pub async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    // The subject names a user that existed when the token was minted;
    // a row can still vanish underneath a live token.
    let user = user_find_by_username(state.db(), &claims.sub)
        .await?
        .ok_or(AppError::InvalidToken)?;
    Ok(Json(ProfileResponse {
        id: user.id.to_string(),
        username: user.username,
        admin: user.is_admin,
    }))
}

/// GET /protected — any authenticated caller.
pub async fn protected(AuthUser(claims): AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "message": "protected resource", "subject": claims.sub }))
}

/// GET /admin — admin callers only.
pub async fn admin_protected(AdminUser(claims): AdminUser) -> Json<serde_json::Value> {
    Json(json!({ "message": "admin resource", "subject": claims.sub }))
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "authgate" })),
    )
}
