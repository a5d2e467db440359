//! PostgreSQL implementation of BroadcastRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use coach_core::entities::Broadcast;
use coach_core::traits::{BroadcastQuery, BroadcastRepository, Delivery, RepoResult};
use coach_core::value_objects::Snowflake;

use crate::models::BroadcastModel;

use super::error::map_db_error;

const BROADCAST_COLUMNS: &str = "id, coach_id, title, body, workout_id, audience, \
     require_confirmation, status, scheduled_at, created_at, updated_at";

/// PostgreSQL implementation of BroadcastRepository
#[derive(Clone)]
pub struct PgBroadcastRepository {
    pool: PgPool,
}

impl PgBroadcastRepository {
    /// Create a new PgBroadcastRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BroadcastRepository for PgBroadcastRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Broadcast>> {
        let result = sqlx::query_as::<_, BroadcastModel>(&format!(
            "SELECT {BROADCAST_COLUMNS} FROM broadcasts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Broadcast::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_owned(&self, id: Snowflake, coach_id: Snowflake) -> RepoResult<Option<Broadcast>> {
        let result = sqlx::query_as::<_, BroadcastModel>(&format!(
            "SELECT {BROADCAST_COLUMNS} FROM broadcasts WHERE id = $1 AND coach_id = $2"
        ))
        .bind(id.into_inner())
        .bind(coach_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Broadcast::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_coach(
        &self,
        coach_id: Snowflake,
        query: BroadcastQuery,
    ) -> RepoResult<Vec<Broadcast>> {
        let limit = query.limit.clamp(1, 100);

        let results = match query.status {
            Some(status) => {
                sqlx::query_as::<_, BroadcastModel>(&format!(
                    r#"
                    SELECT {BROADCAST_COLUMNS}
                    FROM broadcasts
                    WHERE coach_id = $1 AND status = $2
                    ORDER BY created_at DESC, id DESC
                    LIMIT $3
                    "#
                ))
                .bind(coach_id.into_inner())
                .bind(status.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, BroadcastModel>(&format!(
                    r#"
                    SELECT {BROADCAST_COLUMNS}
                    FROM broadcasts
                    WHERE coach_id = $1
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2
                    "#
                ))
                .bind(coach_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        results.into_iter().map(Broadcast::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_due(&self, now: DateTime<Utc>) -> RepoResult<Vec<Broadcast>> {
        // Delivery claims happen inside a transaction, so anything still
        // 'scheduled' here is genuinely unprocessed.
        let results = sqlx::query_as::<_, BroadcastModel>(&format!(
            r#"
            SELECT {BROADCAST_COLUMNS}
            FROM broadcasts
            WHERE status = 'scheduled' AND scheduled_at <= $1
            ORDER BY scheduled_at ASC, id ASC
            "#
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Broadcast::try_from).collect()
    }

    #[instrument(skip(self, broadcast))]
    async fn create(&self, broadcast: &Broadcast) -> RepoResult<()> {
        let audience = serde_json::to_value(&broadcast.audience)
            .map_err(|e| coach_core::error::DomainError::InternalError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO broadcasts (id, coach_id, title, body, workout_id, audience,
                                    require_confirmation, status, scheduled_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(broadcast.id.into_inner())
        .bind(broadcast.coach_id.into_inner())
        .bind(broadcast.title.as_deref())
        .bind(&broadcast.body)
        .bind(broadcast.workout_id.map(Snowflake::into_inner))
        .bind(audience)
        .bind(broadcast.require_confirmation)
        .bind(broadcast.status.as_str())
        .bind(broadcast.scheduled_at)
        .bind(broadcast.created_at)
        .bind(broadcast.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn cancel(&self, id: Snowflake, coach_id: Snowflake) -> RepoResult<bool> {
        // Only a still-scheduled broadcast can be canceled; racing the
        // processor loses gracefully (0 rows).
        let result = sqlx::query(
            r#"
            UPDATE broadcasts
            SET status = 'canceled', updated_at = NOW()
            WHERE id = $1 AND coach_id = $2 AND status = 'scheduled'
            "#,
        )
        .bind(id.into_inner())
        .bind(coach_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, deliveries), fields(deliveries = deliveries.len()))]
    async fn deliver(&self, broadcast_id: Snowflake, deliveries: &[Delivery]) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Claim: flips 'scheduled' -> 'processing'. If another worker (or a
        // cancel) got here first, nothing matches and we bail out without
        // writing any rows.
        let claimed = sqlx::query(
            r#"
            UPDATE broadcasts
            SET status = 'processing', updated_at = NOW()
            WHERE id = $1 AND status = 'scheduled'
            "#,
        )
        .bind(broadcast_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(false);
        }

        for delivery in deliveries {
            let message = &delivery.message;
            sqlx::query(
                r#"
                INSERT INTO thread_messages (id, coach_id, client_id, sender_id, body,
                                             group_message_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(message.id.into_inner())
            .bind(message.coach_id.into_inner())
            .bind(message.client_id.into_inner())
            .bind(message.sender_id.into_inner())
            .bind(&message.body)
            .bind(message.group_message_id.map(Snowflake::into_inner))
            .bind(message.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            let recipient = &delivery.recipient;
            sqlx::query(
                r#"
                INSERT INTO broadcast_recipients (id, message_id, client_id, sent_at,
                                                  confirmed_at, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (message_id, client_id) DO NOTHING
                "#,
            )
            .bind(recipient.id.into_inner())
            .bind(recipient.message_id.into_inner())
            .bind(recipient.client_id.into_inner())
            .bind(recipient.sent_at)
            .bind(recipient.confirmed_at)
            .bind(recipient.created_at)
            .bind(recipient.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        sqlx::query(
            r#"
            UPDATE broadcasts
            SET status = 'sent', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(broadcast_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(true)
    }
}
