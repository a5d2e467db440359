//! Broadcast entity - a coach-authored message scheduled for fan-out

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Audience descriptor determining which clients a broadcast targets.
///
/// Resolved at processing time, not at scheduling time, so roster changes
/// between scheduling and firing are reflected in the fan-out.
///
/// Wire format: `{"type":"all"}` or `{"type":"clients","ids":["..."]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Audience {
    /// Every client currently marked active for the coach
    All,
    /// An explicit subset of client ids (no existence/active filtering)
    Clients { ids: Vec<Snowflake> },
}

impl Audience {
    /// Check if this is the explicit-ids variant with no entries
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::Clients { ids } if ids.is_empty())
    }
}

/// Broadcast delivery status
///
/// `scheduled → processing → sent` monotonically; `canceled` is reachable
/// only from `scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastStatus {
    Scheduled,
    Processing,
    Sent,
    Canceled,
}

impl BroadcastStatus {
    /// Database/string representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Processing => "processing",
            Self::Sent => "sent",
            Self::Canceled => "canceled",
        }
    }

    /// Check whether the status accepts no further transitions
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Sent | Self::Canceled)
    }
}

impl std::fmt::Display for BroadcastStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a status from its string representation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown broadcast status: {0}")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for BroadcastStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "processing" => Ok(Self::Processing),
            "sent" => Ok(Self::Sent),
            "canceled" => Ok(Self::Canceled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Broadcast entity - one per coach-authored announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    pub id: Snowflake,
    pub coach_id: Snowflake,
    pub title: Option<String>,
    pub body: String,
    pub scheduled_at: DateTime<Utc>,
    pub require_confirmation: bool,
    pub audience: Audience,
    pub workout_id: Option<Snowflake>,
    pub status: BroadcastStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Broadcast {
    /// Create a new scheduled Broadcast
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        coach_id: Snowflake,
        title: Option<String>,
        body: String,
        scheduled_at: DateTime<Utc>,
        require_confirmation: bool,
        audience: Audience,
        workout_id: Option<Snowflake>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            coach_id,
            title,
            body,
            scheduled_at,
            require_confirmation,
            audience,
            workout_id,
            status: BroadcastStatus::Scheduled,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the broadcast is eligible for processing at `now`
    #[inline]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == BroadcastStatus::Scheduled && self.scheduled_at <= now
    }

    /// Check if the broadcast can still be canceled
    #[inline]
    pub fn can_cancel(&self) -> bool {
        self.status == BroadcastStatus::Scheduled
    }

    /// Check if the message body is effectively empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
