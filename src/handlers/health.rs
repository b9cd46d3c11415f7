use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::AppState;

/// Root banner, kept separate from the health routes so load balancers
/// hitting `/` get a cheap answer.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Growth Tracker API",
    }))
}

/// Liveness: succeeds whenever the process is up.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "growth-tracker-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness: performs a trivial read against the store. Reports 503 with
/// the error detail when the database is unreachable; sqlx error messages
/// carry no connection credentials.
pub async fn db_health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let result = sqlx::query_as::<_, (String, DateTime<Utc>)>(
        "SELECT message, created_at FROM health_check ORDER BY id LIMIT 1",
    )
    .fetch_optional(&state.db)
    .await;

    match result {
        Ok(Some((message, created_at))) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "db": "ok",
                "message": message,
                "created_at": created_at.to_rfc3339(),
            })),
        ),
        Ok(None) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "db": "ok",
                "message": "No health check message found in database",
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "db": "unreachable",
                    "detail": e.to_string(),
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_liveness_always_ok() {
        let app = Router::new().route("/health", get(health_check));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "growth-tracker-api");
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = Router::new().route("/", get(root));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
