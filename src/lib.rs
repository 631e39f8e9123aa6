pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    auth_service::AuthService, bank_service::BankService, question_service::QuestionService,
    submission_service::SubmissionService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub bank_service: BankService,
    pub question_service: QuestionService,
    pub submission_service: SubmissionService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let auth_service = AuthService::new(pool.clone());
        let bank_service = BankService::new(pool.clone());
        let question_service = QuestionService::new(pool.clone());
        let submission_service = SubmissionService::new(pool.clone());

        Self {
            pool,
            auth_service,
            bank_service,
            question_service,
            submission_service,
        }
    }
}
