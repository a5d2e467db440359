//! Client entity - a coach's client roster entry

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Roster entry linking a client to their coach.
///
/// Roster CRUD is owned by the client-directory collaborator; the broadcast
/// core only reads these rows when resolving an `Audience::All` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: Snowflake,
    pub coach_id: Snowflake,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
