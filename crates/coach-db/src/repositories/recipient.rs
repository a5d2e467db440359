//! PostgreSQL implementation of RecipientRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use coach_core::entities::BroadcastRecipient;
use coach_core::traits::{RecipientRepository, RepoResult};
use coach_core::value_objects::Snowflake;

use crate::models::RecipientModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RecipientRepository
#[derive(Clone)]
pub struct PgRecipientRepository {
    pool: PgPool,
}

impl PgRecipientRepository {
    /// Create a new PgRecipientRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipientRepository for PgRecipientRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        broadcast_id: Snowflake,
        client_id: Snowflake,
    ) -> RepoResult<Option<BroadcastRecipient>> {
        let result = sqlx::query_as::<_, RecipientModel>(
            r#"
            SELECT id, message_id, client_id, sent_at, confirmed_at, created_at, updated_at
            FROM broadcast_recipients
            WHERE message_id = $1 AND client_id = $2
            "#,
        )
        .bind(broadcast_id.into_inner())
        .bind(client_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(BroadcastRecipient::from))
    }

    #[instrument(skip(self))]
    async fn find_by_broadcast(&self, broadcast_id: Snowflake) -> RepoResult<Vec<BroadcastRecipient>> {
        let results = sqlx::query_as::<_, RecipientModel>(
            r#"
            SELECT id, message_id, client_id, sent_at, confirmed_at, created_at, updated_at
            FROM broadcast_recipients
            WHERE message_id = $1
            ORDER BY client_id ASC
            "#,
        )
        .bind(broadcast_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(BroadcastRecipient::from).collect())
    }

    #[instrument(skip(self))]
    async fn confirm(&self, broadcast_id: Snowflake, client_id: Snowflake) -> RepoResult<bool> {
        // First confirmation wins; repeats match zero rows and the stored
        // timestamp never moves.
        let result = sqlx::query(
            r#"
            UPDATE broadcast_recipients
            SET confirmed_at = NOW(), updated_at = NOW()
            WHERE message_id = $1 AND client_id = $2 AND confirmed_at IS NULL
            "#,
        )
        .bind(broadcast_id.into_inner())
        .bind(client_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
