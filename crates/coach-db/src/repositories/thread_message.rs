//! PostgreSQL implementation of ThreadMessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use coach_core::entities::ThreadMessage;
use coach_core::traits::{RepoResult, ThreadMessageRepository};
use coach_core::value_objects::Snowflake;

use crate::models::ThreadMessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ThreadMessageRepository
#[derive(Clone)]
pub struct PgThreadMessageRepository {
    pool: PgPool,
}

impl PgThreadMessageRepository {
    /// Create a new PgThreadMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadMessageRepository for PgThreadMessageRepository {
    #[instrument(skip(self))]
    async fn find_thread(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        after: Option<Snowflake>,
        limit: i64,
    ) -> RepoResult<Vec<ThreadMessage>> {
        let limit = limit.clamp(1, 100);

        let results = match after {
            Some(after) => {
                sqlx::query_as::<_, ThreadMessageModel>(
                    r#"
                    SELECT id, coach_id, client_id, sender_id, body, group_message_id,
                           created_at, read_at
                    FROM thread_messages
                    WHERE coach_id = $1 AND client_id = $2 AND id > $3
                    ORDER BY created_at ASC, id ASC
                    LIMIT $4
                    "#,
                )
                .bind(coach_id.into_inner())
                .bind(client_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ThreadMessageModel>(
                    r#"
                    SELECT id, coach_id, client_id, sender_id, body, group_message_id,
                           created_at, read_at
                    FROM thread_messages
                    WHERE coach_id = $1 AND client_id = $2
                    ORDER BY created_at ASC, id ASC
                    LIMIT $3
                    "#,
                )
                .bind(coach_id.into_inner())
                .bind(client_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ThreadMessage::from).collect())
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &ThreadMessage) -> RepoResult<()> {
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
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_read(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        reader_id: Snowflake,
    ) -> RepoResult<u64> {
        // A reader only marks messages sent by the other party.
        let result = sqlx::query(
            r#"
            UPDATE thread_messages
            SET read_at = NOW()
            WHERE coach_id = $1 AND client_id = $2
              AND sender_id <> $3 AND read_at IS NULL
            "#,
        )
        .bind(coach_id.into_inner())
        .bind(client_id.into_inner())
        .bind(reader_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
