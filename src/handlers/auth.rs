use axum::{extract::State, response::Response};

use crate::models::LoginRequest;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::success;
use crate::validation::ValidatedJson;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<LoginRequest>,
) -> AppResult<Response> {
    match state.auth.login(credentials).await? {
        Some(result) => Ok(success(result, "Login successful")),
        None => Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        )),
    }
}
