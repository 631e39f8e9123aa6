use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use quizbank_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::cors::permissive_cors,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let teacher_api = Router::new()
        .route(
            "/api/banks",
            get(routes::bank::list_banks).post(routes::bank::create_bank),
        )
        .route("/api/banks/:id", get(routes::bank::get_bank))
        .route("/api/banks/:id/toggle", post(routes::bank::toggle_bank))
        .route(
            "/api/banks/:id/questions",
            get(routes::bank::list_questions).post(routes::bank::create_question),
        )
        .route(
            "/api/questions/:id",
            put(routes::bank::update_question).delete(routes::bank::delete_question),
        )
        .route(
            "/api/banks/:id/submissions",
            get(routes::bank::list_submissions),
        )
        .layer(axum::middleware::from_fn(
            quizbank_backend::middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            quizbank_backend::middleware::rate_limit::new_rps_state(config.teacher_rps),
            quizbank_backend::middleware::rate_limit::rps_middleware,
        ));

    let public_api = Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/quiz/:access_code", get(routes::quiz::get_quiz))
        .route(
            "/api/quiz/:access_code/submit",
            post(routes::quiz::submit_quiz),
        )
        .route(
            "/api/result/:submission_id",
            get(routes::quiz::view_result),
        )
        .layer(axum::middleware::from_fn_with_state(
            quizbank_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            quizbank_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(teacher_api)
        .merge(public_api)
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
