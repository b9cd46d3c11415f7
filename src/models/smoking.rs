use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// One logged relapse day. Entry existence is what marks the date as a
/// relapse; `cigarette_count` may be zero. There is no `updated_at` column:
/// relapses are historical events and upsert leaves `created_at` untouched.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SmokingEntry {
    pub date: NaiveDate,
    pub cigarette_count: i32,
    pub location: Option<SmokingLocation>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "smoking_location")]
pub enum SmokingLocation {
    Home,
    Work,
    Social,
    Other,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSmokingRequest {
    pub date: NaiveDate,
    #[validate(range(min = 0, message = "cigarette_count cannot be negative"))]
    pub cigarette_count: i32,
    pub location: Option<SmokingLocation>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SmokingHistoryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_is_valid() {
        let body: CreateSmokingRequest =
            serde_json::from_str(r#"{"date":"2026-01-10","cigarette_count":0}"#).unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_negative_count_rejected() {
        let body: CreateSmokingRequest =
            serde_json::from_str(r#"{"date":"2026-01-10","cigarette_count":-1}"#).unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_unknown_location_rejected_at_deserialization() {
        let result = serde_json::from_str::<CreateSmokingRequest>(
            r#"{"date":"2026-01-10","cigarette_count":2,"location":"Bar"}"#,
        );
        assert!(result.is_err());
    }
}
