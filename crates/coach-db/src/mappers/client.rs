//! Client entity <-> model mapper

use coach_core::entities::Client;
use coach_core::value_objects::Snowflake;

use crate::models::ClientModel;

/// Convert ClientModel to Client entity
impl From<ClientModel> for Client {
    fn from(model: ClientModel) -> Self {
        Client {
            id: Snowflake::new(model.id),
            coach_id: Snowflake::new(model.coach_id),
            name: model.name,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
