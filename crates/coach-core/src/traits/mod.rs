//! Repository traits (ports) for the persistence layer

mod repositories;

pub use repositories::{
    BroadcastQuery, BroadcastRepository, ClientRepository, Delivery, RecipientRepository,
    RepoResult, ThreadMessageRepository, WorkoutRepository,
};
