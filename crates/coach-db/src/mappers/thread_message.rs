//! Thread message entity <-> model mapper

use coach_core::entities::ThreadMessage;
use coach_core::value_objects::Snowflake;

use crate::models::ThreadMessageModel;

/// Convert ThreadMessageModel to ThreadMessage entity
impl From<ThreadMessageModel> for ThreadMessage {
    fn from(model: ThreadMessageModel) -> Self {
        ThreadMessage {
            id: Snowflake::new(model.id),
            coach_id: Snowflake::new(model.coach_id),
            client_id: Snowflake::new(model.client_id),
            sender_id: Snowflake::new(model.sender_id),
            body: model.body,
            group_message_id: model.group_message_id.map(Snowflake::new),
            created_at: model.created_at,
            read_at: model.read_at,
        }
    }
}
