//! Request extractors

mod auth;
mod pagination;
mod validated;

pub use auth::{AuthClient, AuthCoach, AuthUser};
pub use pagination::Pagination;
pub use validated::ValidatedJson;
