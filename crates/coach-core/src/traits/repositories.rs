//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Broadcast, BroadcastRecipient, BroadcastStatus, Client, ThreadMessage, Workout};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Broadcast Repository
// ============================================================================

/// Filter options for a coach's broadcast listing
#[derive(Debug, Clone, Default)]
pub struct BroadcastQuery {
    pub status: Option<BroadcastStatus>,
    pub limit: i64,
}

/// One recipient's fan-out payload: the thread message to materialize plus
/// the delivery-tracking record for the same client.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub message: ThreadMessage,
    pub recipient: BroadcastRecipient,
}

#[async_trait]
pub trait BroadcastRepository: Send + Sync {
    /// Find broadcast by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Broadcast>>;

    /// Find broadcast by ID scoped to its owning coach
    async fn find_owned(&self, id: Snowflake, coach_id: Snowflake)
        -> RepoResult<Option<Broadcast>>;

    /// List a coach's broadcasts, newest first
    async fn find_by_coach(
        &self,
        coach_id: Snowflake,
        query: BroadcastQuery,
    ) -> RepoResult<Vec<Broadcast>>;

    /// All broadcasts with `status = scheduled` and `scheduled_at <= now`
    async fn find_due(&self, now: DateTime<Utc>) -> RepoResult<Vec<Broadcast>>;

    /// Persist a new broadcast
    async fn create(&self, broadcast: &Broadcast) -> RepoResult<()>;

    /// Cancel a still-scheduled broadcast owned by `coach_id`.
    ///
    /// Returns `true` when a row transitioned `scheduled → canceled`, `false`
    /// when no matching cancelable row exists.
    async fn cancel(&self, id: Snowflake, coach_id: Snowflake) -> RepoResult<bool>;

    /// Atomically claim a scheduled broadcast and write its fan-out.
    ///
    /// In one transaction: transition `scheduled → processing` conditioned on
    /// the current status, insert every delivery's thread message and
    /// recipient record, then mark the broadcast `sent`. Returns `false`
    /// without side effects when the claim matches no row (already processed,
    /// canceled, or unknown id).
    async fn deliver(&self, broadcast_id: Snowflake, deliveries: &[Delivery]) -> RepoResult<bool>;
}

// ============================================================================
// Recipient Repository
// ============================================================================

#[async_trait]
pub trait RecipientRepository: Send + Sync {
    /// Find the recipient record for a (broadcast, client) pair
    async fn find(
        &self,
        broadcast_id: Snowflake,
        client_id: Snowflake,
    ) -> RepoResult<Option<BroadcastRecipient>>;

    /// All recipient records for a broadcast
    async fn find_by_broadcast(&self, broadcast_id: Snowflake)
        -> RepoResult<Vec<BroadcastRecipient>>;

    /// Record a client's acknowledgement.
    ///
    /// Sets `confirmed_at` only when the row exists and is not yet confirmed;
    /// returns `true` when a row was updated. A missing or already-confirmed
    /// row yields `false`, never an error.
    async fn confirm(&self, broadcast_id: Snowflake, client_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Thread Message Repository
// ============================================================================

#[async_trait]
pub trait ThreadMessageRepository: Send + Sync {
    /// Messages for a (coach, client) thread ordered by `created_at`
    /// ascending, optionally only those after the given message id
    async fn find_thread(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        after: Option<Snowflake>,
        limit: i64,
    ) -> RepoResult<Vec<ThreadMessage>>;

    /// Persist a new thread message
    async fn create(&self, message: &ThreadMessage) -> RepoResult<()>;

    /// Set `read_at` on the thread's unread messages not authored by the
    /// reader; returns the number of rows updated
    async fn mark_read(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        reader_id: Snowflake,
    ) -> RepoResult<u64>;
}

// ============================================================================
// Client Repository
// ============================================================================

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find client by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Client>>;

    /// Clients currently marked active for the coach
    async fn find_active_by_coach(&self, coach_id: Snowflake) -> RepoResult<Vec<Client>>;
}

// ============================================================================
// Workout Repository
// ============================================================================

#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Find workout by ID (display enrichment only)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Workout>>;
}
