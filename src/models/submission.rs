use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub quiz_bank_id: Uuid,
    pub student_name: String,
    pub student_email: Option<String>,
    pub answers: JsonValue,
    pub score: i32,
    pub total_points: i32,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Percentage derived the same way the grading engine reports it.
    pub fn percentage(&self) -> f64 {
        if self.total_points > 0 {
            let raw = self.score as f64 / self.total_points as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        }
    }
}
