use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::models::question::{Question, QuestionType};
use crate::models::submission::Submission;

#[derive(Debug, Clone, Serialize)]
pub struct PublicBankSummary {
    pub title: String,
    pub description: Option<String>,
    pub access_code: String,
}

/// Question payload as students see it. `question_data` is flattened into
/// the object so option lists render the same way the bank stored them.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: Uuid,
    pub title: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: i32,
    #[serde(flatten)]
    pub question_data: JsonValue,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            title: q.title,
            question_text: q.question_text,
            question_type: q.question_type,
            points: q.points,
            question_data: q.question_data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicQuizResponse {
    pub quiz_bank: PublicBankSummary,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1, message = "Please enter your name"))]
    pub student_name: String,
    #[serde(default)]
    pub student_email: Option<String>,
    /// Keyed by question id as a string; entries may be any JSON shape.
    #[serde(default)]
    pub answers: HashMap<String, JsonValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitQuizResponse {
    pub message: String,
    pub score: i32,
    pub total_points: i32,
    pub percentage: f64,
    pub submission_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub student_name: String,
    pub student_email: Option<String>,
    pub score: i32,
    pub total_points: i32,
    pub percentage: f64,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionSummary {
    fn from(s: Submission) -> Self {
        let percentage = s.percentage();
        Self {
            id: s.id,
            student_name: s.student_name,
            student_email: s.student_email,
            score: s.score,
            total_points: s.total_points,
            percentage,
            submitted_at: s.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultResponse {
    pub submission: SubmissionSummary,
    pub questions: Vec<PublicQuestion>,
    pub student_answers: JsonValue,
}
