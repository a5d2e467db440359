//! Thread service
//!
//! The 1:1 coach↔client thread view, including broadcast enrichment:
//! messages materialized by a fan-out carry their broadcast's title,
//! confirmation requirement, and this client's confirmation state.

use std::collections::HashMap;

use coach_core::entities::{Broadcast, ThreadMessage};
use coach_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{CreateThreadMessageRequest, MarkReadResponse, ThreadMessageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Thread service
pub struct ThreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ThreadService<'a> {
    /// Create a new ThreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch the thread, ascending by creation time, with broadcast
    /// enrichment applied to fan-out messages.
    ///
    /// Enrichment is best-effort: a broadcast, recipient, or workout row that
    /// no longer exists just leaves those fields absent.
    #[instrument(skip(self))]
    pub async fn get_thread(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        after: Option<Snowflake>,
        limit: i64,
    ) -> ServiceResult<Vec<ThreadMessageResponse>> {
        let messages = self
            .ctx
            .thread_repo()
            .find_thread(coach_id, client_id, after, limit)
            .await?;

        // Broadcast rows are shared across messages in the page; fetch each once.
        let mut broadcasts: HashMap<i64, Option<Broadcast>> = HashMap::new();
        let mut responses = Vec::with_capacity(messages.len());

        for message in messages {
            let response = match message.group_message_id {
                Some(broadcast_id) => {
                    let broadcast = match broadcasts.entry(broadcast_id.into_inner()) {
                        std::collections::hash_map::Entry::Occupied(entry) => entry.get().clone(),
                        std::collections::hash_map::Entry::Vacant(entry) => {
                            let fetched =
                                self.ctx.broadcast_repo().find_by_id(broadcast_id).await?;
                            entry.insert(fetched.clone());
                            fetched
                        }
                    };
                    self.enrich(message, broadcast.as_ref(), client_id).await?
                }
                None => ThreadMessageResponse::from(message),
            };
            responses.push(response);
        }

        Ok(responses)
    }

    /// Send an ordinary 1:1 message in the thread
    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        sender_id: Snowflake,
        request: CreateThreadMessageRequest,
    ) -> ServiceResult<ThreadMessageResponse> {
        if request.body.trim().is_empty() {
            return Err(ServiceError::validation("Body must not be blank"));
        }

        let message = ThreadMessage::new(
            self.ctx.generate_id(),
            coach_id,
            client_id,
            sender_id,
            request.body,
        );
        self.ctx.thread_repo().create(&message).await?;

        info!(message_id = %message.id, coach_id = %coach_id, client_id = %client_id, "Thread message sent");
        Ok(ThreadMessageResponse::from(message))
    }

    /// Mark the other party's messages as read
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        reader_id: Snowflake,
    ) -> ServiceResult<MarkReadResponse> {
        let updated = self
            .ctx
            .thread_repo()
            .mark_read(coach_id, client_id, reader_id)
            .await?;
        Ok(MarkReadResponse { updated })
    }

    async fn enrich(
        &self,
        message: ThreadMessage,
        broadcast: Option<&Broadcast>,
        client_id: Snowflake,
    ) -> ServiceResult<ThreadMessageResponse> {
        let mut response = ThreadMessageResponse::from(message);

        let Some(broadcast) = broadcast else {
            return Ok(response);
        };

        response.group_message_title = broadcast.title.clone();
        response.requires_confirmation = Some(broadcast.require_confirmation);

        if let Some(recipient) = self
            .ctx
            .recipient_repo()
            .find(broadcast.id, client_id)
            .await?
        {
            response.confirmed_at = recipient.confirmed_at;
        }

        if let Some(workout_id) = broadcast.workout_id {
            response.workout_id = Some(workout_id);
            if let Some(workout) = self.ctx.workout_repo().find_by_id(workout_id).await? {
                response.workout_name = Some(workout.name);
            }
        }

        Ok(response)
    }
}
