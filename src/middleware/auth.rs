use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::utils::error::AppError;
use crate::utils::jwt::TokenService;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Admin gate for write routes.
///
/// Only `Authorization: Bearer <token>` is accepted. On success the decoded
/// [`AuthClaims`](crate::utils::jwt::AuthClaims) are inserted into the request
/// extensions for handlers to read.
pub async fn require_admin(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        return Err(AppError::Unauthorized("No token provided".to_string()));
    };

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Bearer token rejected");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
