use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::smoking::{CreateSmokingRequest, SmokingEntry, SmokingHistoryQuery};
use crate::AppState;

// No partial-update route here: a relapse log is corrected by upserting the
// whole entry, or removed outright.

pub async fn create_smoking_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateSmokingRequest>,
) -> AppResult<(StatusCode, Json<SmokingEntry>)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = sqlx::query_as::<_, SmokingEntry>(
        r#"
        INSERT INTO smoking_entries (date, cigarette_count, location, remarks)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(body.date)
    .bind(body.cigarette_count)
    .bind(body.location)
    .bind(&body.remarks)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        AppError::conflict_on_unique(e, format!("Entry already exists for {}", body.date))
    })?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Create-or-replace. `created_at` is never touched on the update path.
pub async fn upsert_smoking_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateSmokingRequest>,
) -> AppResult<Json<SmokingEntry>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = sqlx::query_as::<_, SmokingEntry>(
        r#"
        INSERT INTO smoking_entries (date, cigarette_count, location, remarks)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (date) DO UPDATE SET
            cigarette_count = EXCLUDED.cigarette_count,
            location = EXCLUDED.location,
            remarks = EXCLUDED.remarks
        RETURNING *
        "#,
    )
    .bind(body.date)
    .bind(body.cigarette_count)
    .bind(body.location)
    .bind(&body.remarks)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(entry))
}

pub async fn get_smoking_entry(
    State(state): State<AppState>,
    Path(entry_date): Path<NaiveDate>,
) -> AppResult<Json<SmokingEntry>> {
    let entry = sqlx::query_as::<_, SmokingEntry>("SELECT * FROM smoking_entries WHERE date = $1")
        .bind(entry_date)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Smoking entry not found for {entry_date}")))?;

    Ok(Json(entry))
}

pub async fn delete_smoking_entry(
    State(state): State<AppState>,
    Path(entry_date): Path<NaiveDate>,
) -> AppResult<StatusCode> {
    let result = sqlx::query("DELETE FROM smoking_entries WHERE date = $1")
        .bind(entry_date)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Smoking entry not found for {entry_date}"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_smoking_history(
    State(state): State<AppState>,
    Query(query): Query<SmokingHistoryQuery>,
) -> AppResult<Json<Vec<SmokingEntry>>> {
    let entries = sqlx::query_as::<_, SmokingEntry>(
        r#"
        SELECT * FROM smoking_entries
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
