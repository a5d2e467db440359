//! Broadcast service
//!
//! Coach-facing broadcast operations: scheduling, listing, cancelation,
//! immediate send, the delivery report, and the client confirmation path.

use coach_core::entities::{Broadcast, BroadcastStatus};
use coach_core::traits::BroadcastQuery;
use coach_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{BroadcastResponse, CreateBroadcastRequest, RecipientResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::processor::BroadcastProcessor;

/// Broadcast service
pub struct BroadcastService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BroadcastService<'a> {
    /// Create a new BroadcastService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Schedule a new broadcast
    #[instrument(skip(self, request))]
    pub async fn create_broadcast(
        &self,
        coach_id: Snowflake,
        request: CreateBroadcastRequest,
    ) -> ServiceResult<BroadcastResponse> {
        if request.body.trim().is_empty() {
            return Err(ServiceError::validation("Body must not be blank"));
        }

        if let Some(workout_id) = request.workout_id {
            let workout = self
                .ctx
                .workout_repo()
                .find_by_id(workout_id)
                .await?
                .ok_or_else(|| ServiceError::validation("Unknown workout"))?;
            if workout.coach_id != coach_id {
                return Err(ServiceError::validation("Unknown workout"));
            }
        }

        let broadcast = Broadcast::new(
            self.ctx.generate_id(),
            coach_id,
            request.title,
            request.body,
            request.scheduled_at,
            request.require_confirmation,
            request.audience,
            request.workout_id,
        );

        self.ctx.broadcast_repo().create(&broadcast).await?;

        info!(
            broadcast_id = %broadcast.id,
            coach_id = %coach_id,
            scheduled_at = %broadcast.scheduled_at,
            "Broadcast scheduled"
        );

        Ok(BroadcastResponse::from(broadcast))
    }

    /// List the coach's broadcasts, newest first
    #[instrument(skip(self))]
    pub async fn list_broadcasts(
        &self,
        coach_id: Snowflake,
        status: Option<BroadcastStatus>,
        limit: i64,
    ) -> ServiceResult<Vec<BroadcastResponse>> {
        let broadcasts = self
            .ctx
            .broadcast_repo()
            .find_by_coach(coach_id, BroadcastQuery { status, limit })
            .await?;

        Ok(broadcasts.into_iter().map(BroadcastResponse::from).collect())
    }

    /// Get one of the coach's broadcasts
    #[instrument(skip(self))]
    pub async fn get_broadcast(
        &self,
        id: Snowflake,
        coach_id: Snowflake,
    ) -> ServiceResult<BroadcastResponse> {
        let broadcast = self.find_owned(id, coach_id).await?;
        Ok(BroadcastResponse::from(broadcast))
    }

    /// Cancel a still-scheduled broadcast.
    ///
    /// Anything past `scheduled` is settled and refuses cancelation with a
    /// conflict rather than silently rewriting a terminal status.
    #[instrument(skip(self))]
    pub async fn cancel_broadcast(
        &self,
        id: Snowflake,
        coach_id: Snowflake,
    ) -> ServiceResult<BroadcastResponse> {
        let broadcast = self.find_owned(id, coach_id).await?;
        if !broadcast.can_cancel() {
            return Err(ServiceError::conflict(format!(
                "broadcast is {}, only scheduled broadcasts can be canceled",
                broadcast.status
            )));
        }

        // The update re-checks the status, so losing a race to the processor
        // surfaces as a conflict too.
        if !self.ctx.broadcast_repo().cancel(id, coach_id).await? {
            return Err(ServiceError::conflict(
                "broadcast was processed before it could be canceled",
            ));
        }

        info!(broadcast_id = %id, coach_id = %coach_id, "Broadcast canceled");
        let canceled = self.find_owned(id, coach_id).await?;
        Ok(BroadcastResponse::from(canceled))
    }

    /// Process a scheduled broadcast immediately instead of waiting for the
    /// scheduler pass
    #[instrument(skip(self))]
    pub async fn send_now(
        &self,
        id: Snowflake,
        coach_id: Snowflake,
    ) -> ServiceResult<BroadcastResponse> {
        let broadcast = self.find_owned(id, coach_id).await?;
        if broadcast.status != BroadcastStatus::Scheduled {
            return Err(ServiceError::conflict(format!(
                "broadcast is {}, only scheduled broadcasts can be sent",
                broadcast.status
            )));
        }

        let processor = BroadcastProcessor::new(self.ctx);
        if !processor.process(id).await? {
            return Err(ServiceError::conflict(
                "broadcast was processed concurrently",
            ));
        }

        info!(broadcast_id = %id, coach_id = %coach_id, "Broadcast sent immediately");
        let sent = self.find_owned(id, coach_id).await?;
        Ok(BroadcastResponse::from(sent))
    }

    /// Delivery report for a coach's broadcast
    #[instrument(skip(self))]
    pub async fn list_recipients(
        &self,
        id: Snowflake,
        coach_id: Snowflake,
    ) -> ServiceResult<Vec<RecipientResponse>> {
        self.find_owned(id, coach_id).await?;
        let recipients = self.ctx.recipient_repo().find_by_broadcast(id).await?;
        Ok(recipients.into_iter().map(RecipientResponse::from).collect())
    }

    /// Record a client's confirmation of a broadcast.
    ///
    /// Confirming twice, or confirming a broadcast that never reached this
    /// client, is a quiet no-op; only an unknown broadcast id is an error.
    #[instrument(skip(self))]
    pub async fn confirm(&self, broadcast_id: Snowflake, client_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .broadcast_repo()
            .find_by_id(broadcast_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Broadcast", broadcast_id.to_string()))?;

        let updated = self.ctx.recipient_repo().confirm(broadcast_id, client_id).await?;
        if updated {
            info!(broadcast_id = %broadcast_id, client_id = %client_id, "Broadcast confirmed");
        }
        Ok(())
    }

    async fn find_owned(&self, id: Snowflake, coach_id: Snowflake) -> ServiceResult<Broadcast> {
        self.ctx
            .broadcast_repo()
            .find_owned(id, coach_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Broadcast", id.to_string()))
    }
}
