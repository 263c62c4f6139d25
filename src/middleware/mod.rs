//! Middleware: bearer-token extractors enforcing per-endpoint minimum tiers.

pub mod auth;

pub use auth::{AdminUser, AuthUser};
