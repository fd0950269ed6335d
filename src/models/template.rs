use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutTemplate {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub duration_minutes: Option<i32>,
    pub description: Option<String>,
    pub exercises: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub trainer_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub duration_minutes: Option<i32>,
    pub description: Option<String>,
    pub exercises: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub duration_minutes: Option<i32>,
    pub description: Option<String>,
    pub exercises: Option<Value>,
}
