use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// The single JSON envelope every API response (except health) is wrapped in.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn success<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    success_with_status(StatusCode::OK, data, message)
}

pub fn created<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    success_with_status(StatusCode::CREATED, data, message)
}

pub fn success_with_status<T>(status: StatusCode, data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        error: false,
        message: message.into(),
        data: Some(data),
    };
    (status, Json(body)).into_response()
}

pub fn error<T>(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        error: true,
        message: message.into(),
        data,
    };

    (status, Json(body)).into_response()
}
