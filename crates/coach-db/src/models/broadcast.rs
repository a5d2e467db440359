//! Broadcast database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row from the `broadcasts` table.
///
/// `audience` is stored as JSONB and `status` as text; both are parsed
/// into their domain types by the mapper so invalid rows surface as
/// errors at the repository boundary instead of deeper in the service.
#[derive(Debug, Clone, FromRow)]
pub struct BroadcastModel {
    pub id: i64,
    pub coach_id: i64,
    pub title: Option<String>,
    pub body: String,
    pub workout_id: Option<i64>,
    pub audience: serde_json::Value,
    pub require_confirmation: bool,
    pub status: String,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
