//! Data transfer objects for the API boundary

mod requests;
mod responses;

pub use requests::{CreateBroadcastRequest, CreateThreadMessageRequest};
pub use responses::{
    BroadcastResponse, HealthChecks, HealthResponse, MarkReadResponse, ReadinessResponse,
    RecipientResponse, ThreadMessageResponse,
};
