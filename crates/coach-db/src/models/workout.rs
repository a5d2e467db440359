//! Workout database model

use sqlx::FromRow;

/// Row from the `workouts` table
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutModel {
    pub id: i64,
    pub coach_id: i64,
    pub name: String,
}
