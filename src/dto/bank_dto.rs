use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::quiz_bank::QuizBank;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBankRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBankResponse {
    pub message: String,
    pub quiz_bank_id: Uuid,
    pub access_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BankResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub access_code: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<QuizBank> for BankResponse {
    fn from(bank: QuizBank) -> Self {
        Self {
            id: bank.id,
            title: bank.title,
            description: bank.description,
            access_code: bank.access_code,
            is_active: bank.is_active,
            created_at: bank.created_at,
        }
    }
}
