use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::workout::{
    CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutEntry, WorkoutHistoryQuery,
};
use crate::AppState;

pub async fn create_workout(
    State(state): State<AppState>,
    Json(body): Json<CreateWorkoutRequest>,
) -> AppResult<(StatusCode, Json<WorkoutEntry>)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // The primary key on date rejects a second create for the same day even
    // when two requests race.
    let entry = sqlx::query_as::<_, WorkoutEntry>(
        r#"
        INSERT INTO workout_entries (date, workout_type, workout_done, duration_minutes, intensity, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(body.date)
    .bind(body.workout_type)
    .bind(body.workout_done)
    .bind(body.duration_minutes)
    .bind(body.intensity)
    .bind(&body.notes)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        AppError::conflict_on_unique(e, format!("Entry already exists for {}", body.date))
    })?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Create-or-replace. Overwrites every mutable field, preserves
/// `created_at`, refreshes `updated_at`. Safe to retry with the same body.
pub async fn upsert_workout(
    State(state): State<AppState>,
    Json(body): Json<CreateWorkoutRequest>,
) -> AppResult<Json<WorkoutEntry>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = sqlx::query_as::<_, WorkoutEntry>(
        r#"
        INSERT INTO workout_entries (date, workout_type, workout_done, duration_minutes, intensity, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (date) DO UPDATE SET
            workout_type = EXCLUDED.workout_type,
            workout_done = EXCLUDED.workout_done,
            duration_minutes = EXCLUDED.duration_minutes,
            intensity = EXCLUDED.intensity,
            notes = EXCLUDED.notes,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(body.date)
    .bind(body.workout_type)
    .bind(body.workout_done)
    .bind(body.duration_minutes)
    .bind(body.intensity)
    .bind(&body.notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(entry))
}

pub async fn get_workout(
    State(state): State<AppState>,
    Path(entry_date): Path<NaiveDate>,
) -> AppResult<Json<WorkoutEntry>> {
    let entry = sqlx::query_as::<_, WorkoutEntry>("SELECT * FROM workout_entries WHERE date = $1")
        .bind(entry_date)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workout entry not found for {entry_date}")))?;

    Ok(Json(entry))
}

/// Partial update: omitted fields keep their stored values. The date is the
/// primary key and cannot change.
pub async fn update_workout(
    State(state): State<AppState>,
    Path(entry_date): Path<NaiveDate>,
    Json(body): Json<UpdateWorkoutRequest>,
) -> AppResult<Json<WorkoutEntry>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = sqlx::query_as::<_, WorkoutEntry>(
        r#"
        UPDATE workout_entries SET
            workout_type = COALESCE($2, workout_type),
            workout_done = COALESCE($3, workout_done),
            duration_minutes = COALESCE($4, duration_minutes),
            intensity = COALESCE($5, intensity),
            notes = COALESCE($6, notes),
            updated_at = NOW()
        WHERE date = $1
        RETURNING *
        "#,
    )
    .bind(entry_date)
    .bind(body.workout_type)
    .bind(body.workout_done)
    .bind(body.duration_minutes)
    .bind(body.intensity)
    .bind(&body.notes)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Workout entry not found for {entry_date}")))?;

    Ok(Json(entry))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(entry_date): Path<NaiveDate>,
) -> AppResult<StatusCode> {
    let result = sqlx::query("DELETE FROM workout_entries WHERE date = $1")
        .bind(entry_date)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Workout entry not found for {entry_date}"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_workout_history(
    State(state): State<AppState>,
    Query(query): Query<WorkoutHistoryQuery>,
) -> AppResult<Json<Vec<WorkoutEntry>>> {
    let entries = sqlx::query_as::<_, WorkoutEntry>(
        r#"
        SELECT * FROM workout_entries
        WHERE ($1::date IS NULL OR date >= $1)
          AND ($2::date IS NULL OR date <= $2)
        ORDER BY date DESC
        "#,
    )
    .bind(query.start_date)
    .bind(query.end_date)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}
