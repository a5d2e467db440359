//! # coach-service
//!
//! Application layer for the coach server.
//!
//! Holds the broadcast pipeline (processor + scheduler), the coach-facing
//! broadcast operations, the thread view with broadcast enrichment, the
//! request/response DTOs, and the `ServiceContext` dependency container
//! everything runs against.

pub mod dto;
pub mod services;

pub use dto::{
    BroadcastResponse, CreateBroadcastRequest, CreateThreadMessageRequest, HealthResponse,
    MarkReadResponse, ReadinessResponse, RecipientResponse, ThreadMessageResponse,
};
pub use services::{
    BroadcastProcessor, BroadcastScheduler, BroadcastService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ThreadService,
};
