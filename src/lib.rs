pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::repositories::Repositories;
use crate::services::{
    admin_service::AdminService, attempt_service::AttemptService, auth_service::AuthService,
    question_service::QuestionService, test_service::TestService,
};
use crate::utils::token::TokenKeys;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenKeys,
    pub auth_service: AuthService,
    pub admin_service: AdminService,
    pub test_service: TestService,
    pub question_service: QuestionService,
    pub attempt_service: AttemptService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self::with_repositories(Repositories::postgres(pool), config)
    }

    pub fn with_repositories(repos: Repositories, config: &Config) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret, config.access_token_expire_minutes);

        let auth_service = AuthService::new(repos.accounts.clone(), tokens.clone());
        let admin_service = AdminService::new(
            repos.accounts.clone(),
            repos.catalog.clone(),
            repos.attempts.clone(),
        );
        let test_service = TestService::new(
            repos.tests.clone(),
            repos.catalog.clone(),
            repos.accounts.clone(),
        );
        let question_service = QuestionService::new(
            repos.accounts.clone(),
            repos.tests.clone(),
            repos.questions.clone(),
        );
        let attempt_service = AttemptService::new(
            repos.tests,
            repos.questions,
            repos.attempts,
            config.test_duration_minutes,
        );

        Self {
            tokens,
            auth_service,
            admin_service,
            test_service,
            question_service,
            attempt_service,
        }
    }
}
