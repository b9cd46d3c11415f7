use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// One logged workout day. `date` is the primary key; at most one entry
/// exists per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub workout_type: WorkoutType,
    pub workout_done: bool,
    pub duration_minutes: i32,
    pub intensity: Option<IntensityLevel>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "workout_type")]
pub enum WorkoutType {
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    Cardio,
    Others,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "intensity_level")]
pub enum IntensityLevel {
    Low,
    Moderate,
    High,
}

/// Body for both create and upsert. The full field set is required either
/// way; upsert replaces every mutable field of an existing entry.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    pub date: NaiveDate,
    pub workout_type: WorkoutType,
    #[serde(default = "default_workout_done")]
    pub workout_done: bool,
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: i32,
    pub intensity: Option<IntensityLevel>,
    pub notes: Option<String>,
}

fn default_workout_done() -> bool {
    true
}

/// Partial update. Omitted fields keep their stored values; the date itself
/// is immutable (it is the primary key).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    pub workout_type: Option<WorkoutType>,
    pub workout_done: Option<bool>,
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: Option<i32>,
    pub intensity: Option<IntensityLevel>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutHistoryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
