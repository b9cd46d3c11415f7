//! Deployment-time database tasks. Both routes are idempotent: re-running a
//! deploy script must not fail on an existing database or schema.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::bootstrap;
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDatabaseRequest {
    #[serde(default = "default_db_name")]
    pub db_name: String,
}

fn default_db_name() -> String {
    "growth_tracker".into()
}

pub async fn create_database(
    State(state): State<AppState>,
    Json(body): Json<CreateDatabaseRequest>,
) -> AppResult<Json<Value>> {
    if !bootstrap::is_valid_database_name(&body.db_name) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid database name",
            body.db_name
        )));
    }

    let created = bootstrap::create_database(&state.config.admin_database_url, &body.db_name)
        .await
        .map_err(AppError::Database)?;

    let detail = if created {
        format!("database '{}' created", body.db_name)
    } else {
        format!("database '{}' already exists", body.db_name)
    };
    tracing::info!(db_name = %body.db_name, created, "create_database task finished");

    Ok(Json(json!({ "status": "ok", "detail": detail })))
}

pub async fn create_tables(State(state): State<AppState>) -> AppResult<Json<Value>> {
    bootstrap::ensure_schema(&state.db)
        .await
        .map_err(AppError::Database)?;

    Ok(Json(json!({
        "status": "ok",
        "detail": "tables created or already exist",
    })))
}
