//! Workout entity - display-name lookup for broadcast enrichment

use crate::value_objects::Snowflake;

/// Minimal workout reference. Workout CRUD lives outside the broadcast core;
/// only the name is needed here, for thread-view enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: Snowflake,
    pub coach_id: Snowflake,
    pub name: String,
}
