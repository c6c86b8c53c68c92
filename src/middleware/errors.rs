use axum::response::Response;

use crate::utils::error::InternalErrorDetail;
use crate::utils::response::error as error_response;

/// Rewrites 500 bodies with the underlying error message. Only mounted
/// outside production.
pub async fn expose_internal_errors(mut response: Response) -> Response {
    match response.extensions_mut().remove::<InternalErrorDetail>() {
        Some(InternalErrorDetail(detail)) => error_response::<()>(response.status(), detail, None),
        None => response,
    }
}
