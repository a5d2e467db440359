//! Broadcast recipient entity <-> model mapper

use coach_core::entities::BroadcastRecipient;
use coach_core::value_objects::Snowflake;

use crate::models::RecipientModel;

/// Convert RecipientModel to BroadcastRecipient entity
impl From<RecipientModel> for BroadcastRecipient {
    fn from(model: RecipientModel) -> Self {
        BroadcastRecipient {
            id: Snowflake::new(model.id),
            message_id: Snowflake::new(model.message_id),
            client_id: Snowflake::new(model.client_id),
            sent_at: model.sent_at,
            confirmed_at: model.confirmed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
