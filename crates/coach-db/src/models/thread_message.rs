//! Thread message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row from the `thread_messages` table
#[derive(Debug, Clone, FromRow)]
pub struct ThreadMessageModel {
    pub id: i64,
    pub coach_id: i64,
    pub client_id: i64,
    pub sender_id: i64,
    pub body: String,
    pub group_message_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}
