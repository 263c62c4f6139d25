//! Authentication core: password hashing, JWT, policy gate, register, login.

mod handlers;
mod jwt;
pub mod password;
pub mod policy;
pub mod service;

pub use handlers::{login, register};
pub use jwt::{Claims, JwtSecret};
pub use policy::Tier;
