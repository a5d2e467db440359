//! Entity <-> model mappers

mod broadcast;
mod client;
mod recipient;
mod thread_message;
mod workout;
