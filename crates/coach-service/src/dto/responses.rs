//! Response DTOs for API endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;

use coach_core::entities::{Audience, Broadcast, BroadcastRecipient, BroadcastStatus, ThreadMessage};
use coach_core::value_objects::Snowflake;

/// Broadcast response
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastResponse {
    pub id: Snowflake,
    pub coach_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    pub scheduled_at: DateTime<Utc>,
    pub require_confirmation: bool,
    pub audience: Audience,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<Snowflake>,
    pub status: BroadcastStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Broadcast> for BroadcastResponse {
    fn from(broadcast: Broadcast) -> Self {
        Self {
            id: broadcast.id,
            coach_id: broadcast.coach_id,
            title: broadcast.title,
            body: broadcast.body,
            scheduled_at: broadcast.scheduled_at,
            require_confirmation: broadcast.require_confirmation,
            audience: broadcast.audience,
            workout_id: broadcast.workout_id,
            status: broadcast.status,
            created_at: broadcast.created_at,
            updated_at: broadcast.updated_at,
        }
    }
}

/// Delivery-report entry for one recipient of a broadcast
#[derive(Debug, Clone, Serialize)]
pub struct RecipientResponse {
    pub id: Snowflake,
    pub message_id: Snowflake,
    pub client_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    pub confirmed: bool,
}

impl From<BroadcastRecipient> for RecipientResponse {
    fn from(recipient: BroadcastRecipient) -> Self {
        let confirmed = recipient.is_confirmed();
        Self {
            id: recipient.id,
            message_id: recipient.message_id,
            client_id: recipient.client_id,
            sent_at: recipient.sent_at,
            confirmed_at: recipient.confirmed_at,
            confirmed,
        }
    }
}

/// Thread message response, optionally enriched with broadcast metadata.
///
/// Enrichment fields are present only for broadcast-originated messages whose
/// originating rows still exist; a missing Broadcast/recipient/workout row
/// leaves them absent without affecting the base message.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadMessageResponse {
    pub id: Snowflake,
    pub coach_id: Snowflake,
    pub client_id: Snowflake,
    pub sender_id: Snowflake,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_message_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,

    // Broadcast enrichment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_message_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_confirmation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_name: Option<String>,
}

impl From<ThreadMessage> for ThreadMessageResponse {
    fn from(message: ThreadMessage) -> Self {
        Self {
            id: message.id,
            coach_id: message.coach_id,
            client_id: message.client_id,
            sender_id: message.sender_id,
            body: message.body,
            group_message_id: message.group_message_id,
            created_at: message.created_at,
            read_at: message.read_at,
            group_message_title: None,
            requires_confirmation: None,
            confirmed_at: None,
            workout_id: None,
            workout_name: None,
        }
    }
}

/// Result of a thread mark-read call
#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
