//! Database layer: pool and the user repository for PostgreSQL.

mod pool;
mod users;

pub use pool::{create_pool, DbPool};
pub use users::*;
