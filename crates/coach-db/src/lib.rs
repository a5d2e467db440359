//! # coach-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `coach-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ model mappers (the `audience` JSONB and `status` text columns
//!   are parsed into their domain types exactly once, here)
//! - Repository implementations, including the transactional broadcast
//!   delivery (claim + fan-out + terminal update)

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgBroadcastRepository, PgClientRepository, PgRecipientRepository, PgThreadMessageRepository,
    PgWorkoutRepository,
};

/// Apply pending schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
