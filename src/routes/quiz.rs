use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::quiz_dto::{
    PublicBankSummary, PublicQuestion, PublicQuizResponse, ResultResponse, SubmissionSummary,
    SubmitQuizRequest, SubmitQuizResponse,
};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(access_code): Path<String>,
) -> Result<Response> {
    let bank = state.bank_service.get_active_by_code(&access_code).await?;
    let questions = state.question_service.list_for_bank(bank.id).await?;
    let response = PublicQuizResponse {
        quiz_bank: PublicBankSummary {
            title: bank.title,
            description: bank.description,
            access_code: bank.access_code,
        },
        questions: questions.into_iter().map(PublicQuestion::from).collect(),
    };
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Path(access_code): Path<String>,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<Response> {
    payload.validate()?;
    let bank = state.bank_service.get_active_by_code(&access_code).await?;
    tracing::info!(
        bank_id = %bank.id,
        answer_count = payload.answers.len(),
        "grading incoming submission"
    );

    let (submission, result) = state.submission_service.submit(&bank, payload).await?;
    tracing::info!(
        submission_id = %submission.id,
        score = result.score,
        total_points = result.total_points,
        percentage = result.percentage,
        "submission graded"
    );

    Ok(Json(SubmitQuizResponse {
        message: "Quiz submitted successfully".to_string(),
        score: result.score,
        total_points: result.total_points,
        percentage: result.percentage,
        submission_id: submission.id,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn view_result(
    State(state): State<AppState>,
    Path(submission_id): Path<Uuid>,
) -> Result<Response> {
    let submission = state.submission_service.get(submission_id).await?;
    let questions = state
        .question_service
        .list_for_bank(submission.quiz_bank_id)
        .await?;
    let student_answers = submission.answers.clone();
    let response = ResultResponse {
        submission: SubmissionSummary::from(submission),
        questions: questions.into_iter().map(PublicQuestion::from).collect(),
        student_answers,
    };
    Ok(Json(response).into_response())
}
