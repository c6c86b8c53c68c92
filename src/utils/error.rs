use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use crate::repository::StoreError;
use crate::utils::response::error as error_response;
use crate::validation::FieldError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The underlying message of a 500, attached to the response extensions.
/// The body always carries [`INTERNAL_ERROR_MESSAGE`] unless a layer swaps it in.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Event with slug '{0}' already exists")]
    Conflict(String),

    #[error("Store error: {0}")]
    Infrastructure(#[from] StoreError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Infrastructure(_) | AppError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn event_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("Event with id {} not found", id))
    }

    fn log(&self) {
        match self {
            AppError::Infrastructure(e) => error!(error = ?e, "Store failure"),
            AppError::Unexpected(msg) => error!(message = %msg, "Unexpected failure"),
            other => debug!(error = %other, status = %other.status_code(), "Request rejected"),
        }
    }

    fn is_internal(&self) -> bool {
        matches!(self, AppError::Infrastructure(_) | AppError::Unexpected(_))
    }

    fn public_message(&self) -> String {
        if self.is_internal() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.log();

        let message = self.public_message();
        let detail = self.is_internal().then(|| InternalErrorDetail(self.to_string()));
        let mut response = match self {
            AppError::Validation(errors) => error_response(status, message, Some(errors)),
            _ => error_response::<()>(status, message, None),
        };
        if let Some(detail) = detail {
            response.extensions_mut().insert(detail);
        }
        response
    }
}
