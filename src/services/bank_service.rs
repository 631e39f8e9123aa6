use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::bank_dto::CreateBankRequest;
use crate::error::Result;
use crate::models::quiz_bank::QuizBank;
use crate::utils::token::{generate_access_code, ACCESS_CODE_LENGTH};

#[derive(Clone)]
pub struct BankService {
    pool: PgPool,
}

impl BankService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, teacher_id: Uuid, payload: CreateBankRequest) -> Result<QuizBank> {
        let access_code = self.unique_access_code().await?;
        let bank = sqlx::query_as::<_, QuizBank>(
            r#"
            INSERT INTO quiz_banks (title, description, access_code, is_active, teacher_id)
            VALUES ($1, $2, $3, TRUE, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&access_code)
        .bind(teacher_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(bank)
    }

    async fn unique_access_code(&self) -> Result<String> {
        loop {
            let code = generate_access_code(ACCESS_CODE_LENGTH);
            let taken: i64 =
                sqlx::query_scalar(r#"SELECT COUNT(*) FROM quiz_banks WHERE access_code = $1"#)
                    .bind(&code)
                    .fetch_one(&self.pool)
                    .await?;
            if taken == 0 {
                return Ok(code);
            }
        }
    }

    pub async fn list_for_teacher(&self, teacher_id: Uuid) -> Result<Vec<QuizBank>> {
        let banks = sqlx::query_as::<_, QuizBank>(
            r#"SELECT * FROM quiz_banks WHERE teacher_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(banks)
    }

    pub async fn get(&self, bank_id: Uuid) -> Result<QuizBank> {
        let bank = sqlx::query_as::<_, QuizBank>(r#"SELECT * FROM quiz_banks WHERE id = $1"#)
            .bind(bank_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(bank)
    }

    pub async fn toggle_active(&self, bank_id: Uuid) -> Result<QuizBank> {
        let bank = sqlx::query_as::<_, QuizBank>(
            r#"UPDATE quiz_banks SET is_active = NOT is_active WHERE id = $1 RETURNING *"#,
        )
        .bind(bank_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(bank)
    }

    /// Students resolve banks by code; inactive banks are invisible to them.
    pub async fn get_active_by_code(&self, access_code: &str) -> Result<QuizBank> {
        let bank = sqlx::query_as::<_, QuizBank>(
            r#"SELECT * FROM quiz_banks WHERE access_code = $1 AND is_active = TRUE"#,
        )
        .bind(access_code)
        .fetch_one(&self.pool)
        .await?;
        Ok(bank)
    }
}
