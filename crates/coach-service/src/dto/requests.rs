//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use coach_core::entities::Audience;
use coach_core::value_objects::Snowflake;

/// Create broadcast request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBroadcastRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 4000, message = "Body must be 1-4000 characters"))]
    pub body: String,

    /// When the broadcast should fire; a past instant makes it due on the
    /// next scheduler pass
    pub scheduled_at: DateTime<Utc>,

    /// Tagged audience object: `{"type":"all"}` or
    /// `{"type":"clients","ids":["..."]}`
    pub audience: Audience,

    #[serde(default)]
    pub require_confirmation: bool,

    pub workout_id: Option<Snowflake>,
}

/// Send an ordinary 1:1 thread message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThreadMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Body must be 1-4000 characters"))]
    pub body: String,
}
