//! Broadcast entity <-> model mapper

use coach_core::entities::{Audience, Broadcast, BroadcastStatus};
use coach_core::error::DomainError;
use coach_core::value_objects::Snowflake;

use crate::models::BroadcastModel;

/// Convert BroadcastModel to Broadcast entity.
///
/// Fallible: the `audience` JSONB and `status` text columns must parse
/// into their domain types. A row that fails here is corrupt and the
/// error names the offending column content.
impl TryFrom<BroadcastModel> for Broadcast {
    type Error = DomainError;

    fn try_from(model: BroadcastModel) -> Result<Self, Self::Error> {
        let audience: Audience = serde_json::from_value(model.audience.clone())
            .map_err(|_| DomainError::InvalidAudience(model.audience.to_string()))?;

        let status: BroadcastStatus = model
            .status
            .parse()
            .map_err(|_| DomainError::InvalidStatus(model.status.clone()))?;

        Ok(Broadcast {
            id: Snowflake::new(model.id),
            coach_id: Snowflake::new(model.coach_id),
            title: model.title,
            body: model.body,
            workout_id: model.workout_id.map(Snowflake::new),
            audience,
            require_confirmation: model.require_confirmation,
            status,
            scheduled_at: model.scheduled_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
