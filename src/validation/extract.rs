use axum::async_trait;
use axum::extract::{FromRequest, Json, Request};
use serde_json::Value;

use super::{parse, Validate};
use crate::utils::error::AppError;

/// JSON body extractor that runs the payload's rule table before handing
/// the typed value to the handler. Failures become a 400 with field errors.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state).await?;

        parse::<T>(&payload)
            .map(ValidatedJson)
            .map_err(AppError::Validation)
    }
}
