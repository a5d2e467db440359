//! Service layer

mod broadcast;
mod context;
mod error;
mod processor;
mod scheduler;
mod thread;

#[cfg(test)]
pub(crate) mod testing;

pub use broadcast::BroadcastService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use processor::BroadcastProcessor;
pub use scheduler::BroadcastScheduler;
pub use thread::ThreadService;
