use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::smoking::SmokingLocation;
use crate::models::workout::WorkoutType;
use crate::services::stats;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WorkoutStats {
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_workout_days: i64,
    pub total_days: i64,
    pub workout_percentage: f64,
    pub average_duration: Option<f64>,
    pub most_common_type: Option<WorkoutType>,
}

#[derive(Debug, Serialize)]
pub struct SmokingStats {
    pub current_clean_streak: i64,
    pub longest_clean_streak: i64,
    pub total_relapses: i64,
    pub total_cigarettes: i64,
    pub most_common_location: Option<SmokingLocation>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub workout: WorkoutStats,
    pub smoking: SmokingStats,
    pub last_updated: NaiveDate,
}

/// All KPIs for both logs in one payload, computed over the configured
/// tracking window as of today. Entries dated after today never contribute.
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardResponse>> {
    let period_start = state.config.period_start;
    let as_of = Utc::now().date_naive().min(state.config.period_end);

    let workout = workout_stats(&state, period_start, as_of).await?;
    let smoking = smoking_stats(&state, period_start, as_of).await?;

    Ok(Json(DashboardResponse {
        workout,
        smoking,
        last_updated: as_of,
    }))
}

async fn workout_stats(
    state: &AppState,
    period_start: NaiveDate,
    as_of: NaiveDate,
) -> AppResult<WorkoutStats> {
    let dates = sqlx::query_scalar::<_, NaiveDate>(
        r#"
        SELECT date FROM workout_entries
        WHERE date BETWEEN $1 AND $2
        ORDER BY date ASC
        "#,
    )
    .bind(period_start)
    .bind(as_of)
    .fetch_all(&state.db)
    .await?;

    // Zero-duration rows never qualify for the average; AVG already skips
    // NULLs.
    let average_duration = sqlx::query_scalar::<_, Option<f64>>(
        r#"
        SELECT AVG(duration_minutes)::float8 FROM workout_entries
        WHERE date BETWEEN $1 AND $2 AND duration_minutes > 0
        "#,
    )
    .bind(period_start)
    .bind(as_of)
    .fetch_one(&state.db)
    .await?;

    // Ties resolved by whatever order the store returns.
    let most_common_type = sqlx::query_scalar::<_, WorkoutType>(
        r#"
        SELECT workout_type FROM workout_entries
        WHERE date BETWEEN $1 AND $2
        GROUP BY workout_type
        ORDER BY COUNT(*) DESC
        LIMIT 1
        "#,
    )
    .bind(period_start)
    .bind(as_of)
    .fetch_optional(&state.db)
    .await?;

    let total_workout_days = dates.len() as i64;
    let total_days = stats::elapsed_days(period_start, as_of);

    Ok(WorkoutStats {
        current_streak: stats::current_presence_streak(&dates, period_start, as_of),
        longest_streak: stats::longest_presence_streak(&dates),
        total_workout_days,
        total_days,
        workout_percentage: stats::presence_percentage(total_workout_days, total_days),
        average_duration: average_duration.map(stats::round1),
        most_common_type,
    })
}

async fn smoking_stats(
    state: &AppState,
    period_start: NaiveDate,
    as_of: NaiveDate,
) -> AppResult<SmokingStats> {
    let dates = sqlx::query_scalar::<_, NaiveDate>(
        r#"
        SELECT date FROM smoking_entries
        WHERE date BETWEEN $1 AND $2
        ORDER BY date ASC
        "#,
    )
    .bind(period_start)
    .bind(as_of)
    .fetch_all(&state.db)
    .await?;

    let total_cigarettes = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COALESCE(SUM(cigarette_count), 0)::bigint FROM smoking_entries
        WHERE date BETWEEN $1 AND $2
        "#,
    )
    .bind(period_start)
    .bind(as_of)
    .fetch_one(&state.db)
    .await?;

    let most_common_location = sqlx::query_scalar::<_, SmokingLocation>(
        r#"
        SELECT location FROM smoking_entries
        WHERE date BETWEEN $1 AND $2 AND location IS NOT NULL
        GROUP BY location
        ORDER BY COUNT(*) DESC
        LIMIT 1
        "#,
    )
    .bind(period_start)
    .bind(as_of)
    .fetch_optional(&state.db)
    .await?;

    Ok(SmokingStats {
        current_clean_streak: stats::current_absence_streak(&dates, period_start, as_of),
        longest_clean_streak: stats::longest_absence_streak(&dates, period_start, as_of),
        // An entry marks a relapse day even when its cigarette count is zero.
        total_relapses: dates.len() as i64,
        total_cigarettes,
        most_common_location,
    })
}
