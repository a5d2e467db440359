//! PostgreSQL implementation of WorkoutRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use coach_core::entities::Workout;
use coach_core::traits::{RepoResult, WorkoutRepository};
use coach_core::value_objects::Snowflake;

use crate::models::WorkoutModel;

use super::error::map_db_error;

/// PostgreSQL implementation of WorkoutRepository
#[derive(Clone)]
pub struct PgWorkoutRepository {
    pool: PgPool,
}

impl PgWorkoutRepository {
    /// Create a new PgWorkoutRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutRepository for PgWorkoutRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Workout>> {
        let result = sqlx::query_as::<_, WorkoutModel>(
            r#"
            SELECT id, coach_id, name
            FROM workouts
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Workout::from))
    }
}
