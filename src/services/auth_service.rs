use std::sync::Arc;

use crate::error::{Error, Result};
use crate::middleware::auth::Role;
use crate::repositories::AccountRepository;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::TokenKeys;

const BAD_CREDENTIALS: &str = "Incorrect username or password";

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    tokens: TokenKeys,
}

impl AuthService {
    pub fn new(accounts: Arc<dyn AccountRepository>, tokens: TokenKeys) -> Self {
        Self { accounts, tokens }
    }

    pub async fn login_admin(&self, username: &str, password: &str) -> Result<String> {
        let admin = self.accounts.find_admin(username).await?;
        match admin {
            Some(admin) if verify_password(password, &admin.password_hash) => {
                tracing::info!(username = %admin.username, "admin logged in");
                self.tokens.issue(&admin.username, Role::Admin, None)
            }
            _ => {
                tracing::warn!(username = %username, "admin login rejected");
                Err(Error::Unauthorized(BAD_CREDENTIALS.to_string()))
            }
        }
    }

    pub async fn login_teacher(&self, username: &str, password: &str) -> Result<String> {
        let teacher = self.accounts.find_teacher(username).await?;
        match teacher {
            Some(teacher) if verify_password(password, &teacher.password_hash) => {
                tracing::info!(username = %teacher.username, "teacher logged in");
                self.tokens
                    .issue(&teacher.username, Role::Teacher, Some(teacher.id))
            }
            _ => {
                tracing::warn!(username = %username, "teacher login rejected");
                Err(Error::Unauthorized(BAD_CREDENTIALS.to_string()))
            }
        }
    }

    /// Creates the bootstrap admin on first start. Returns whether one was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool> {
        if self.accounts.find_admin(username).await?.is_some() {
            return Ok(false);
        }
        let password_hash = hash_password(password)?;
        self.accounts.create_admin(username, &password_hash).await?;
        tracing::info!(username = %username, "seeded initial admin account");
        Ok(true)
    }
}
