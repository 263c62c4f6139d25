//! Registration and login orchestration over the credential store.

use tracing::debug;

use crate::auth::jwt::JwtSecret;
use crate::auth::password;
use crate::db::{user_create, user_find_by_username, DbPool, UserRow};
use crate::error::{AppError, AppResult};

/// Create a new user. The username pre-check gives the common case a clean
/// error without burning an insert; the conflict-aware insert closes the
/// race when two callers pass the check at once.
pub async fn register(pool: &DbPool, username: &str, plain_password: &str) -> AppResult<UserRow> {
    if user_find_by_username(pool, username).await?.is_some() {
        return Err(AppError::UsernameTaken);
    }

    let password_hash = password::hash_password(plain_password)?;
    let user = user_create(pool, username, &password_hash).await?;
    debug!(username = %user.username, "registered user");
    Ok(user)
}

/// Authenticate and mint an access token. Unknown username and wrong
/// password are indistinguishable to the caller.
pub async fn login(
    pool: &DbPool,
    jwt: &JwtSecret,
    username: &str,
    plain_password: &str,
) -> AppResult<String> {
    let user = user_find_by_username(pool, username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(plain_password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    jwt.issue(&user.username, user.is_admin)
}
