use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizBank {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub access_code: String,
    pub is_active: bool,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
}
