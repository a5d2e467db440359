//! PostgreSQL implementation of ClientRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use coach_core::entities::Client;
use coach_core::traits::{ClientRepository, RepoResult};
use coach_core::value_objects::Snowflake;

use crate::models::ClientModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ClientRepository
#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    /// Create a new PgClientRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Client>> {
        let result = sqlx::query_as::<_, ClientModel>(
            r#"
            SELECT id, coach_id, name, is_active, created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Client::from))
    }

    #[instrument(skip(self))]
    async fn find_active_by_coach(&self, coach_id: Snowflake) -> RepoResult<Vec<Client>> {
        let results = sqlx::query_as::<_, ClientModel>(
            r#"
            SELECT id, coach_id, name, is_active, created_at, updated_at
            FROM clients
            WHERE coach_id = $1 AND is_active
            ORDER BY id ASC
            "#,
        )
        .bind(coach_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Client::from).collect())
    }
}
