//! ThreadMessage entity - a message in the 1:1 coach↔client thread

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Ordinary coach↔client message. Broadcasts materialize one of these per
/// recipient, with `group_message_id` pointing back at the Broadcast.
///
/// The back-reference is non-owning: it only lets the thread view join to the
/// Broadcast for display enrichment, and losing the Broadcast must not break
/// ordinary message display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub id: Snowflake,
    pub coach_id: Snowflake,
    pub client_id: Snowflake,
    pub sender_id: Snowflake,
    pub body: String,
    /// Back-reference to the originating Broadcast, if any
    pub group_message_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    /// Set by the thread mark-read mechanism, independent of confirmation
    pub read_at: Option<DateTime<Utc>>,
}

impl ThreadMessage {
    /// Create an ordinary 1:1 message
    pub fn new(
        id: Snowflake,
        coach_id: Snowflake,
        client_id: Snowflake,
        sender_id: Snowflake,
        body: String,
    ) -> Self {
        Self {
            id,
            coach_id,
            client_id,
            sender_id,
            body,
            group_message_id: None,
            created_at: Utc::now(),
            read_at: None,
        }
    }

    /// Create a broadcast-originated message for one recipient
    pub fn from_broadcast(
        id: Snowflake,
        coach_id: Snowflake,
        client_id: Snowflake,
        body: String,
        broadcast_id: Snowflake,
    ) -> Self {
        Self {
            id,
            coach_id,
            client_id,
            sender_id: coach_id,
            body,
            group_message_id: Some(broadcast_id),
            created_at: Utc::now(),
            read_at: None,
        }
    }

    /// Check if this message originated from a broadcast
    #[inline]
    pub fn is_broadcast(&self) -> bool {
        self.group_message_id.is_some()
    }

    /// Check if the message has been read
    #[inline]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}
