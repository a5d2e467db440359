//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Broadcast not found: {0}")]
    BroadcastNotFound(Snowflake),

    #[error("Client not found: {0}")]
    ClientNotFound(Snowflake),

    #[error("Workout not found: {0}")]
    WorkoutNotFound(Snowflake),

    #[error("No recipient record for broadcast {broadcast_id} and client {client_id}")]
    RecipientNotFound {
        broadcast_id: Snowflake,
        client_id: Snowflake,
    },

    #[error("Thread message not found: {0}")]
    ThreadMessageNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Broadcast body must not be empty")]
    EmptyBody,

    #[error("Invalid audience descriptor: {0}")]
    InvalidAudience(String),

    #[error("Invalid broadcast status: {0}")]
    InvalidStatus(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the owning coach of this broadcast")]
    NotBroadcastOwner,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Broadcast is no longer cancelable (status: {status})")]
    NotCancelable { status: String },

    #[error("Broadcast has already been processed")]
    AlreadyProcessed,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::BroadcastNotFound(_) => "UNKNOWN_BROADCAST",
            Self::ClientNotFound(_) => "UNKNOWN_CLIENT",
            Self::WorkoutNotFound(_) => "UNKNOWN_WORKOUT",
            Self::RecipientNotFound { .. } => "UNKNOWN_RECIPIENT",
            Self::ThreadMessageNotFound(_) => "UNKNOWN_MESSAGE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyBody => "EMPTY_BODY",
            Self::InvalidAudience(_) => "INVALID_AUDIENCE",
            Self::InvalidStatus(_) => "INVALID_STATUS",

            // Authorization
            Self::NotBroadcastOwner => "NOT_BROADCAST_OWNER",

            // Business Rules
            Self::NotCancelable { .. } => "NOT_CANCELABLE",
            Self::AlreadyProcessed => "ALREADY_PROCESSED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BroadcastNotFound(_)
                | Self::ClientNotFound(_)
                | Self::WorkoutNotFound(_)
                | Self::RecipientNotFound { .. }
                | Self::ThreadMessageNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyBody
                | Self::InvalidAudience(_)
                | Self::InvalidStatus(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotBroadcastOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::NotCancelable { .. } | Self::AlreadyProcessed)
    }
}
