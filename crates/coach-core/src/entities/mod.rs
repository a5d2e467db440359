//! Domain entities - core business objects

mod broadcast;
mod client;
mod recipient;
mod thread_message;
mod workout;

pub use broadcast::{Audience, Broadcast, BroadcastStatus, ParseStatusError};
pub use client::Client;
pub use recipient::BroadcastRecipient;
pub use thread_message::ThreadMessage;
pub use workout::Workout;
