//! Idempotent schema and database creation.
//!
//! The same DDL runs at startup and behind the `/db/create_tables` admin
//! route, so a fresh deployment works whether or not the deploy script
//! called the admin endpoints first.

use sqlx::{Connection, Executor, PgConnection, PgPool};

/// Enum types are created with an exception guard since `CREATE TYPE` has no
/// `IF NOT EXISTS` form.
const SCHEMA_DDL: &[&str] = &[
    r#"
    DO $$ BEGIN
        CREATE TYPE workout_type AS ENUM
            ('Push', 'Pull', 'Legs', 'Upper', 'Lower', 'Cardio', 'Others');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    DO $$ BEGIN
        CREATE TYPE intensity_level AS ENUM ('Low', 'Moderate', 'High');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    DO $$ BEGIN
        CREATE TYPE smoking_location AS ENUM ('Home', 'Work', 'Social', 'Other');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS workout_entries (
        date DATE PRIMARY KEY,
        workout_type workout_type NOT NULL,
        workout_done BOOLEAN NOT NULL DEFAULT TRUE,
        duration_minutes INTEGER NOT NULL,
        intensity intensity_level,
        notes TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS smoking_entries (
        date DATE PRIMARY KEY,
        cigarette_count INTEGER NOT NULL,
        location smoking_location,
        remarks TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS health_check (
        id SERIAL PRIMARY KEY,
        message TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for ddl in SCHEMA_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Returns `true` if the database was created, `false` if it already existed.
pub async fn create_database(admin_url: &str, name: &str) -> Result<bool, sqlx::Error> {
    let mut conn = PgConnection::connect(admin_url).await?;

    // Identifiers cannot be bound as query parameters; the caller must have
    // validated `name` with `is_valid_database_name` first.
    let result = conn
        .execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
        .await;

    match result {
        Ok(_) => Ok(true),
        // 42P04: duplicate_database
        Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("42P04") => Ok(false),
        Err(e) => Err(e),
    }
}

/// Restricts database names to unquoted-identifier characters so the name can
/// be safely interpolated into the `CREATE DATABASE` statement.
pub fn is_valid_database_name(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    first_ok
        && name.len() <= 63
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
