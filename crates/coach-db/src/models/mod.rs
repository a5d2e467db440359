//! Database models
//!
//! Row types deserialized straight from PostgreSQL with `sqlx::FromRow`.
//! These mirror table layout, not domain shape; mappers translate them
//! into `coach-core` entities.

mod broadcast;
mod client;
mod recipient;
mod thread_message;
mod workout;

pub use broadcast::BroadcastModel;
pub use client::ClientModel;
pub use recipient::RecipientModel;
pub use thread_message::ThreadMessageModel;
pub use workout::WorkoutModel;
