use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::question_dto::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::error::{Error, Result};
use crate::models::question::Question;

#[derive(Clone)]
pub struct QuestionService {
    pool: PgPool,
}

impl QuestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_bank(&self, bank_id: Uuid) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"SELECT * FROM questions WHERE quiz_bank_id = $1 ORDER BY order_index"#,
        )
        .bind(bank_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    pub async fn get(&self, question_id: Uuid) -> Result<Question> {
        let question = sqlx::query_as::<_, Question>(r#"SELECT * FROM questions WHERE id = $1"#)
            .bind(question_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(question)
    }

    pub async fn create(&self, bank_id: Uuid, payload: CreateQuestionRequest) -> Result<Question> {
        let max_order: i32 = sqlx::query_scalar(
            r#"SELECT COALESCE(MAX(order_index), 0) FROM questions WHERE quiz_bank_id = $1"#,
        )
        .bind(bank_id)
        .fetch_one(&self.pool)
        .await?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (
                quiz_bank_id, title, question_text, question_type,
                question_data, points, order_index
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(&payload.title)
        .bind(&payload.question_text)
        .bind(payload.question_type)
        .bind(&payload.question_data)
        .bind(payload.points)
        .bind(max_order + 1)
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }

    pub async fn update(
        &self,
        question_id: Uuid,
        payload: UpdateQuestionRequest,
    ) -> Result<Question> {
        let existing = self.get(question_id).await?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET title = $1, question_text = $2, question_type = $3,
                question_data = $4, points = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(payload.title.unwrap_or(existing.title))
        .bind(payload.question_text.unwrap_or(existing.question_text))
        .bind(payload.question_type.unwrap_or(existing.question_type))
        .bind(payload.question_data.unwrap_or(existing.question_data))
        .bind(payload.points.unwrap_or(existing.points))
        .bind(question_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }

    pub async fn delete(&self, question_id: Uuid) -> Result<()> {
        let result = sqlx::query(r#"DELETE FROM questions WHERE id = $1"#)
            .bind(question_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Question not found".to_string()));
        }
        Ok(())
    }
}
