//! Database connection pool

mod postgres;

pub use postgres::{create_pool, create_pool_from_env, ping, DatabaseConfig};
pub use sqlx::PgPool;
