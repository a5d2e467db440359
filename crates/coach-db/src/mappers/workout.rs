//! Workout entity <-> model mapper

use coach_core::entities::Workout;
use coach_core::value_objects::Snowflake;

use crate::models::WorkoutModel;

/// Convert WorkoutModel to Workout entity
impl From<WorkoutModel> for Workout {
    fn from(model: WorkoutModel) -> Self {
        Workout {
            id: Snowflake::new(model.id),
            coach_id: Snowflake::new(model.coach_id),
            name: model.name,
        }
    }
}
