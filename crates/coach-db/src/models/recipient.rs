//! Broadcast recipient database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row from the `broadcast_recipients` table
#[derive(Debug, Clone, FromRow)]
pub struct RecipientModel {
    pub id: i64,
    pub message_id: i64,
    pub client_id: i64,
    pub sent_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
