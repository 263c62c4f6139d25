//! User registration and JWT bearer-token authentication backend.
//!
//! Registers users against PostgreSQL, verifies credentials with Argon2,
//! issues HS256 access tokens, and gates routes by a three-tier policy
//! (anonymous, authenticated, admin).

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};
use handlers::http;

/// Build the API router (auth, protected routes, health). Used by main and
/// by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    axum::Router::new()
        .route("/health", get(http::health))
        .route("/me", get(http::me))
        .route("/protected", get(http::protected))
        .route("/admin", get(http::admin_protected))
        .nest("/auth", auth_routes)
        .with_state(state)
}
