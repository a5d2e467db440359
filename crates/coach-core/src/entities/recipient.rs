//! BroadcastRecipient entity - per-(broadcast, client) delivery record

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Delivery/confirmation tracking row, created at fan-out time.
///
/// At most one exists per (message_id, client_id) pair. `confirmed_at` only
/// transitions from `None` to a timestamp, never back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRecipient {
    pub id: Snowflake,
    /// The owning Broadcast's id
    pub message_id: Snowflake,
    pub client_id: Snowflake,
    /// When the thread message was materialized for this client
    pub sent_at: Option<DateTime<Utc>>,
    /// When the client acknowledged the message
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BroadcastRecipient {
    /// Create a recipient record at fan-out time (`sent_at` set, unconfirmed)
    pub fn new_sent(id: Snowflake, message_id: Snowflake, client_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            message_id,
            client_id,
            sent_at: Some(now),
            confirmed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the recipient has acknowledged the broadcast
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }
}
