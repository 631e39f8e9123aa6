use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub quiz_bank_id: Uuid,
    pub title: String,
    pub question_text: String,
    pub question_type: QuestionType,
    /// Options plus the answer key, opaque outside the grading engine.
    pub question_data: JsonValue,
    pub points: i32,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    FillBlank,
    Dropdown,
    DropdownFillBlank,
    Parsons,
}

/// Answer-key payload parsed out of `question_data` for the question's
/// declared type. Unknown fields (option lists, slot texts) are ignored.
#[derive(Debug, Clone)]
pub enum AnswerKey {
    Choice(ChoiceKey),
    MultipleChoice(MultipleChoiceKey),
    FillBlank(FillBlankKey),
    DropdownFillBlank(DropdownFillBlankKey),
    Parsons(ParsonsKey),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceKey {
    pub correct_answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultipleChoiceKey {
    #[serde(default)]
    pub correct_answers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FillBlankKey {
    #[serde(default)]
    pub correct_answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlankSpec {
    pub correct_answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DropdownFillBlankKey {
    #[serde(default)]
    pub blanks: Vec<BlankSpec>,
}

/// Parsons keys carry either the current `slot_answers` mapping or the
/// legacy `correct_order` sequence; older banks may hold both.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsonsKey {
    #[serde(default)]
    pub slot_answers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub correct_order: Option<Vec<String>>,
}

impl AnswerKey {
    /// Parses the key for the declared question type. A payload that does
    /// not fit the type yields `None`, which the grading engine treats as
    /// an incorrect answer rather than an error.
    pub fn parse(question_type: QuestionType, data: &JsonValue) -> Option<Self> {
        let key = match question_type {
            QuestionType::SingleChoice | QuestionType::Dropdown => {
                AnswerKey::Choice(serde_json::from_value(data.clone()).ok()?)
            }
            QuestionType::MultipleChoice => {
                AnswerKey::MultipleChoice(serde_json::from_value(data.clone()).ok()?)
            }
            QuestionType::FillBlank => {
                AnswerKey::FillBlank(serde_json::from_value(data.clone()).ok()?)
            }
            QuestionType::DropdownFillBlank => {
                AnswerKey::DropdownFillBlank(serde_json::from_value(data.clone()).ok()?)
            }
            QuestionType::Parsons => {
                AnswerKey::Parsons(serde_json::from_value(data.clone()).ok()?)
            }
        };
        Some(key)
    }
}
