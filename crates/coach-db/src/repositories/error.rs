//! Error handling utilities for repositories

use coach_core::error::DomainError;
use coach_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "broadcast not found" error
pub fn broadcast_not_found(id: Snowflake) -> DomainError {
    DomainError::BroadcastNotFound(id)
}

/// Create a "client not found" error
pub fn client_not_found(id: Snowflake) -> DomainError {
    DomainError::ClientNotFound(id)
}

/// Create a "workout not found" error
pub fn workout_not_found(id: Snowflake) -> DomainError {
    DomainError::WorkoutNotFound(id)
}

/// Create a "recipient not found" error
pub fn recipient_not_found(broadcast_id: Snowflake, client_id: Snowflake) -> DomainError {
    DomainError::RecipientNotFound {
        broadcast_id,
        client_id,
    }
}
