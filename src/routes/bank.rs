use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::bank_dto::{BankResponse, CreateBankRequest, CreateBankResponse};
use crate::dto::question_dto::{CreateQuestionRequest, QuestionResponse, UpdateQuestionRequest};
use crate::dto::quiz_dto::SubmissionSummary;
use crate::middleware::auth::Claims;
use crate::models::quiz_bank::QuizBank;
use crate::AppState;

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": "You do not own this quiz bank"
        })),
    )
        .into_response()
}

fn owns(bank: &QuizBank, teacher_id: Uuid) -> bool {
    bank.teacher_id == teacher_id
}

#[axum::debug_handler]
pub async fn list_banks(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let teacher_id = claims.user_id()?;
    let banks = state.bank_service.list_for_teacher(teacher_id).await?;
    let response: Vec<BankResponse> = banks.into_iter().map(BankResponse::from).collect();
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn create_bank(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBankRequest>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let teacher_id = claims.user_id()?;
    let bank = state.bank_service.create(teacher_id, payload).await?;
    tracing::info!(bank_id = %bank.id, access_code = %bank.access_code, "quiz bank created");
    Ok((
        StatusCode::CREATED,
        Json(CreateBankResponse {
            message: "Quiz bank created".to_string(),
            quiz_bank_id: bank.id,
            access_code: bank.access_code,
        }),
    )
        .into_response())
}

#[axum::debug_handler]
pub async fn get_bank(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(bank_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let teacher_id = claims.user_id()?;
    let bank = state.bank_service.get(bank_id).await?;
    if !owns(&bank, teacher_id) {
        return Ok(forbidden());
    }
    let questions = state.question_service.list_for_bank(bank_id).await?;
    let questions: Vec<QuestionResponse> =
        questions.into_iter().map(QuestionResponse::from).collect();
    Ok(Json(json!({
        "bank": BankResponse::from(bank),
        "questions": questions,
    }))
    .into_response())
}

#[axum::debug_handler]
pub async fn toggle_bank(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(bank_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let teacher_id = claims.user_id()?;
    let bank = state.bank_service.get(bank_id).await?;
    if !owns(&bank, teacher_id) {
        return Ok(forbidden());
    }
    let updated = state.bank_service.toggle_active(bank_id).await?;
    tracing::info!(bank_id = %updated.id, is_active = updated.is_active, "quiz bank toggled");
    Ok(Json(json!({
        "message": "Quiz bank updated",
        "is_active": updated.is_active,
    }))
    .into_response())
}

#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(bank_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let teacher_id = claims.user_id()?;
    let bank = state.bank_service.get(bank_id).await?;
    if !owns(&bank, teacher_id) {
        return Ok(forbidden());
    }
    let questions = state.question_service.list_for_bank(bank_id).await?;
    let response: Vec<QuestionResponse> =
        questions.into_iter().map(QuestionResponse::from).collect();
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(bank_id): Path<Uuid>,
    Json(payload): Json<CreateQuestionRequest>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let teacher_id = claims.user_id()?;
    let bank = state.bank_service.get(bank_id).await?;
    if !owns(&bank, teacher_id) {
        return Ok(forbidden());
    }
    let question = state.question_service.create(bank_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Question added",
            "question_id": question.id,
        })),
    )
        .into_response())
}

#[axum::debug_handler]
pub async fn update_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let teacher_id = claims.user_id()?;
    let question = state.question_service.get(question_id).await?;
    let bank = state.bank_service.get(question.quiz_bank_id).await?;
    if !owns(&bank, teacher_id) {
        return Ok(forbidden());
    }
    let updated = state.question_service.update(question_id, payload).await?;
    Ok(Json(json!({
        "message": "Question updated",
        "question": QuestionResponse::from(updated),
    }))
    .into_response())
}

#[axum::debug_handler]
pub async fn delete_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(question_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let teacher_id = claims.user_id()?;
    let question = state.question_service.get(question_id).await?;
    let bank = state.bank_service.get(question.quiz_bank_id).await?;
    if !owns(&bank, teacher_id) {
        return Ok(forbidden());
    }
    state.question_service.delete(question_id).await?;
    Ok(Json(json!({ "message": "Question deleted" })).into_response())
}

#[axum::debug_handler]
pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(bank_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let teacher_id = claims.user_id()?;
    let bank = state.bank_service.get(bank_id).await?;
    if !owns(&bank, teacher_id) {
        return Ok(forbidden());
    }
    let submissions = state.submission_service.list_for_bank(bank_id).await?;
    let response: Vec<SubmissionSummary> = submissions
        .into_iter()
        .map(SubmissionSummary::from)
        .collect();
    Ok(Json(response).into_response())
}
