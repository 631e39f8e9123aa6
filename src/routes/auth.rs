use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.auth_service.register(payload).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "teacher account registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Registration successful",
            "user": {
                "id": user.id,
                "username": user.username,
                "email": user.email,
            }
        })),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, token) = state.auth_service.login(payload).await?;
    Ok(Json(AuthResponse {
        token,
        username: user.username,
    }))
}
