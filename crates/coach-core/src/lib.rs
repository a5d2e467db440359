//! # coach-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Audience, Broadcast, BroadcastRecipient, BroadcastStatus, Client, ThreadMessage, Workout,
};
pub use error::DomainError;
pub use traits::{
    BroadcastQuery, BroadcastRepository, ClientRepository, Delivery, RecipientRepository,
    RepoResult, ThreadMessageRepository, WorkoutRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
