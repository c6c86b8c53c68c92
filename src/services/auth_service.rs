use std::sync::Arc;

use crate::models::{AdminSummary, LoginRequest, LoginResponse};
use crate::repository::AdminRepository;
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt::TokenService;

#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn AdminRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(repository: Arc<dyn AdminRepository>, tokens: TokenService) -> Self {
        Self { repository, tokens }
    }

    /// Returns `None` for an unknown username and for a wrong password alike.
    pub async fn login(&self, credentials: LoginRequest) -> AppResult<Option<LoginResponse>> {
        let Some(admin) = self
            .repository
            .find_by_username(&credentials.username)
            .await?
        else {
            tracing::debug!(username = %credentials.username, "Login for unknown admin");
            return Ok(None);
        };

        let hash = admin.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(credentials.password, &hash))
            .await
            .map_err(|e| AppError::Unexpected(format!("password check aborted: {}", e)))?
            .map_err(|e| AppError::Unexpected(format!("stored password hash unusable: {}", e)))?;

        if !matches {
            tracing::debug!(username = %admin.username, "Login with wrong password");
            return Ok(None);
        }

        let token = self
            .tokens
            .issue(admin.id, &admin.username)
            .map_err(|e| AppError::Unexpected(format!("failed to sign token: {}", e)))?;

        tracing::info!(admin_id = %admin.id, username = %admin.username, "Admin logged in");
        Ok(Some(LoginResponse {
            token,
            admin: AdminSummary {
                id: admin.id,
                username: admin.username,
            },
        }))
    }
}
