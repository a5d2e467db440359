//! Client database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row from the `clients` table
#[derive(Debug, Clone, FromRow)]
pub struct ClientModel {
    pub id: i64,
    pub coach_id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
