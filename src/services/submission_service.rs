use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::quiz_dto::SubmitQuizRequest;
use crate::error::Result;
use crate::models::question::Question;
use crate::models::quiz_bank::QuizBank;
use crate::models::submission::Submission;
use crate::services::grading_service::{GradingResult, GradingService};

#[derive(Clone)]
pub struct SubmissionService {
    pool: PgPool,
}

impl SubmissionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grades the submission against the bank's full question list and
    /// persists the result together with the raw answers payload.
    pub async fn submit(
        &self,
        bank: &QuizBank,
        payload: SubmitQuizRequest,
    ) -> Result<(Submission, GradingResult)> {
        let questions = sqlx::query_as::<_, Question>(
            r#"SELECT * FROM questions WHERE quiz_bank_id = $1 ORDER BY order_index"#,
        )
        .bind(bank.id)
        .fetch_all(&self.pool)
        .await?;

        let result = GradingService::grade(&questions, &payload.answers);
        let answers_json = serde_json::to_value(&payload.answers)?;

        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                quiz_bank_id, student_name, student_email, answers, score, total_points
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(bank.id)
        .bind(&payload.student_name)
        .bind(&payload.student_email)
        .bind(answers_json)
        .bind(result.score)
        .bind(result.total_points)
        .fetch_one(&self.pool)
        .await?;

        Ok((submission, result))
    }

    pub async fn list_for_bank(&self, bank_id: Uuid) -> Result<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"SELECT * FROM submissions WHERE quiz_bank_id = $1 ORDER BY submitted_at DESC"#,
        )
        .bind(bank_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(submissions)
    }

    pub async fn get(&self, submission_id: Uuid) -> Result<Submission> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(submission_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(submission)
    }
}
