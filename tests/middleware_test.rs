use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Extension, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use quizbank_backend::middleware::auth::Claims;
use tower::ServiceExt;
use uuid::Uuid;

fn ensure_config() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/quizbank_test");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("TOKEN_TTL_HOURS", "24");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("TEACHER_RPS", "100");
    let _ = quizbank_backend::config::init_config();
}

async fn whoami(Extension(claims): Extension<Claims>) -> String {
    claims.sub
}

fn protected_app() -> Router {
    Router::new().route("/whoami", get(whoami)).layer(
        axum::middleware::from_fn(quizbank_backend::middleware::auth::require_bearer_auth),
    )
}

#[tokio::test]
async fn rejects_requests_without_a_bearer_token() {
    ensure_config();
    let app = protected_app();

    let req = Request::builder()
        .uri("/whoami")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/whoami")
        .header("authorization", "Basic abc")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/whoami")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn accepts_a_valid_bearer_token_and_exposes_claims() {
    ensure_config();
    let user_id = Uuid::new_v4();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        role: Some("teacher".to_string()),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("test_secret_key".as_bytes()),
    )
    .unwrap();

    let app = protected_app();
    let req = Request::builder()
        .uri("/whoami")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), user_id.to_string());
}

#[tokio::test]
async fn rate_limiter_returns_429_over_the_window_budget() {
    async fn ok() -> &'static str {
        "ok"
    }

    let app = Router::new().route("/", get(ok)).layer(
        axum::middleware::from_fn_with_state(
            quizbank_backend::middleware::rate_limit::new_rps_state(2),
            quizbank_backend::middleware::rate_limit::rps_middleware,
        ),
    );

    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}
