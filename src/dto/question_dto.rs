use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::models::question::{Question, QuestionType};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default = "default_question_data")]
    pub question_data: JsonValue,
    #[serde(default = "default_points")]
    pub points: i32,
}

fn default_points() -> i32 {
    1
}

fn default_question_data() -> JsonValue {
    serde_json::json!({})
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub question_text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub question_data: Option<JsonValue>,
    pub points: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub title: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: i32,
    pub order_index: i32,
    pub question_data: JsonValue,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            title: q.title,
            question_text: q.question_text,
            question_type: q.question_type,
            points: q.points,
            order_index: q.order_index,
            question_data: q.question_data,
        }
    }
}
