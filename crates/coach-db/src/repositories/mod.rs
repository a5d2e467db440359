//! PostgreSQL repository implementations

pub mod error;

mod broadcast;
mod client;
mod recipient;
mod thread_message;
mod workout;

pub use broadcast::PgBroadcastRepository;
pub use client::PgClientRepository;
pub use recipient::PgRecipientRepository;
pub use thread_message::PgThreadMessageRepository;
pub use workout::PgWorkoutRepository;
