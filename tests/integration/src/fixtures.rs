//! Test fixtures and data generators
//!
//! Provides reusable request and response shapes for integration tests.

use chrono::{DateTime, Duration, Utc};
use coach_core::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Create broadcast request
#[derive(Debug, Serialize)]
pub struct CreateBroadcastRequest {
    pub title: Option<String>,
    pub body: String,
    pub scheduled_at: DateTime<Utc>,
    pub audience: serde_json::Value,
    pub require_confirmation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
}

impl CreateBroadcastRequest {
    /// A broadcast addressed to specific clients, already due
    pub fn due_for_clients(client_ids: &[Snowflake]) -> Self {
        let ids: Vec<String> = client_ids.iter().map(ToString::to_string).collect();
        Self {
            title: Some("Schedule change".to_string()),
            body: "Session moved to 6pm tomorrow.".to_string(),
            scheduled_at: Utc::now() - Duration::seconds(5),
            audience: json!({ "type": "clients", "ids": ids }),
            require_confirmation: true,
            workout_id: None,
        }
    }

    /// A broadcast to all active clients, scheduled in the future
    pub fn future_for_all() -> Self {
        Self {
            title: Some("Holiday hours".to_string()),
            body: "The gym closes early on Friday.".to_string(),
            scheduled_at: Utc::now() + Duration::hours(2),
            audience: json!({ "type": "all" }),
            require_confirmation: false,
            workout_id: None,
        }
    }
}

/// Create thread message request
#[derive(Debug, Serialize)]
pub struct CreateThreadMessageRequest {
    pub body: String,
}

impl CreateThreadMessageRequest {
    pub fn simple(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

/// Broadcast response
#[derive(Debug, Deserialize)]
pub struct BroadcastResponse {
    pub id: String,
    pub coach_id: String,
    pub title: Option<String>,
    pub body: String,
    pub scheduled_at: String,
    pub require_confirmation: bool,
    pub audience: serde_json::Value,
    pub workout_id: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Delivery-report entry for one recipient
#[derive(Debug, Deserialize)]
pub struct RecipientResponse {
    pub id: String,
    pub message_id: String,
    pub client_id: String,
    pub sent_at: Option<String>,
    pub confirmed_at: Option<String>,
    pub confirmed: bool,
}

/// Thread message response
#[derive(Debug, Deserialize)]
pub struct ThreadMessageResponse {
    pub id: String,
    pub coach_id: String,
    pub client_id: String,
    pub sender_id: String,
    pub body: String,
    pub group_message_id: Option<String>,
    pub created_at: String,
    pub read_at: Option<String>,
    pub group_message_title: Option<String>,
    pub requires_confirmation: Option<bool>,
    pub confirmed_at: Option<String>,
    pub workout_id: Option<String>,
    pub workout_name: Option<String>,
}

/// Mark-read response
#[derive(Debug, Deserialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
