//! User repository: the credential store behind registration and login.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::DbPool;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert a new user. Every user starts without admin rights; promotion is a
/// manual administrative step outside this service.
///
/// The UNIQUE constraint on `username` is the serialization point for
/// concurrent registrations: `ON CONFLICT DO NOTHING` turns the loser of the
/// race into an empty result, reported as `UsernameTaken`.
pub async fn user_create(
    pool: &DbPool,
    username: &str,
    password_hash: &str,
) -> AppResult<UserRow> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, password_hash, is_admin)
        VALUES ($1, $2, false)
        ON CONFLICT (username) DO NOTHING
        RETURNING id, username, password_hash, is_admin, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;
    row.ok_or(AppError::UsernameTaken)
}

pub async fn user_find_by_username(pool: &DbPool, username: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, is_admin, created_at FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
