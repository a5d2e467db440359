//! Broadcast processor
//!
//! Resolves the audience of a due broadcast and hands the fan-out to the
//! store's atomic delivery. Audience resolution happens here, at processing
//! time, so roster changes between scheduling and firing are honored.

use coach_core::entities::{Audience, BroadcastRecipient, BroadcastStatus, ThreadMessage};
use coach_core::traits::Delivery;
use coach_core::Snowflake;
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Broadcast processor
pub struct BroadcastProcessor<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BroadcastProcessor<'a> {
    /// Create a new BroadcastProcessor
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Process one broadcast: resolve the audience, build the per-recipient
    /// payloads, and deliver them in one transaction.
    ///
    /// Returns `true` when this call performed the delivery. A missing,
    /// already-processed, or canceled broadcast returns `false` without side
    /// effects; the store-side claim guarantees that even when two processors
    /// race past the status pre-check.
    #[instrument(skip(self))]
    pub async fn process(&self, broadcast_id: Snowflake) -> ServiceResult<bool> {
        let Some(broadcast) = self.ctx.broadcast_repo().find_by_id(broadcast_id).await? else {
            debug!(broadcast_id = %broadcast_id, "Broadcast vanished before processing");
            return Ok(false);
        };

        if broadcast.status != BroadcastStatus::Scheduled {
            debug!(broadcast_id = %broadcast_id, status = %broadcast.status, "Broadcast not claimable");
            return Ok(false);
        }

        let client_ids = self.resolve_audience(broadcast.coach_id, &broadcast.audience).await?;

        let deliveries: Vec<Delivery> = client_ids
            .iter()
            .map(|&client_id| {
                let message = ThreadMessage::from_broadcast(
                    self.ctx.generate_id(),
                    broadcast.coach_id,
                    client_id,
                    broadcast.body.clone(),
                    broadcast.id,
                );
                let recipient =
                    BroadcastRecipient::new_sent(self.ctx.generate_id(), broadcast.id, client_id);
                Delivery { message, recipient }
            })
            .collect();

        let delivered = self
            .ctx
            .broadcast_repo()
            .deliver(broadcast.id, &deliveries)
            .await?;

        if delivered {
            info!(
                broadcast_id = %broadcast.id,
                coach_id = %broadcast.coach_id,
                recipients = deliveries.len(),
                "Broadcast delivered"
            );
        } else {
            debug!(broadcast_id = %broadcast.id, "Delivery claim lost; no rows written");
        }

        Ok(delivered)
    }

    /// Resolve an audience into concrete client ids at call time.
    ///
    /// `All` queries the coach's currently active roster; explicit ids pass
    /// through untouched, without existence or active filtering. An empty
    /// result is valid and produces a zero-recipient fan-out.
    pub async fn resolve_audience(
        &self,
        coach_id: Snowflake,
        audience: &Audience,
    ) -> ServiceResult<Vec<Snowflake>> {
        match audience {
            Audience::All => {
                let clients = self.ctx.client_repo().find_active_by_coach(coach_id).await?;
                Ok(clients.into_iter().map(|c| c.id).collect())
            }
            Audience::Clients { ids } => Ok(ids.clone()),
        }
    }
}
