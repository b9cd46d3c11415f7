use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "growth_tracker_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config.database_url).await;

    // Same DDL the /db/create_tables task runs; a fresh database is usable
    // without a separate deploy step.
    db::bootstrap::ensure_schema(&db)
        .await
        .expect("Failed to create database schema");

    tracing::info!(
        period_start = %config.period_start,
        period_end = %config.period_end,
        "Database schema ensured"
    );

    let state = AppState {
        db,
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/health/db", get(handlers::health::db_health))
        // Workouts
        .route("/api/workouts", post(handlers::workouts::create_workout))
        .route(
            "/api/workouts/upsert",
            post(handlers::workouts::upsert_workout),
        )
        .route(
            "/api/workouts/history",
            get(handlers::workouts::get_workout_history),
        )
        .route("/api/workouts/:date", get(handlers::workouts::get_workout))
        .route(
            "/api/workouts/:date",
            put(handlers::workouts::update_workout),
        )
        .route(
            "/api/workouts/:date",
            delete(handlers::workouts::delete_workout),
        )
        // Smoking (no partial-update route by design)
        .route("/api/smoking", post(handlers::smoking::create_smoking_entry))
        .route(
            "/api/smoking/upsert",
            post(handlers::smoking::upsert_smoking_entry),
        )
        .route(
            "/api/smoking/history",
            get(handlers::smoking::get_smoking_history),
        )
        .route(
            "/api/smoking/:date",
            get(handlers::smoking::get_smoking_entry),
        )
        .route(
            "/api/smoking/:date",
            delete(handlers::smoking::delete_smoking_entry),
        )
        // Dashboard
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        // Deployment-time tasks
        .route(
            "/db/create_database",
            post(handlers::db_admin::create_database),
        )
        .route("/db/create_tables", post(handlers::db_admin::create_tables))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
