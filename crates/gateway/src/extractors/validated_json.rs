//! Validated JSON extractor.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;

/// JSON extractor that automatically validates the payload.
///
/// The body is parsed as JSON whatever the `Content-Type`, since existing
/// clients post registrations without one.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let Json(value) =
            Json::<T>::from_bytes(&bytes).map_err(|e| AppError::validation(e.body_text()))?;

        value.validate().map_err(|e| {
            // Get first validation error message
            let message = e
                .field_errors()
                .values()
                .next()
                .and_then(|errors| errors.first())
                .and_then(|error| error.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| "Validation failed".to_string());
            AppError::validation(message)
        })?;

        Ok(ValidatedJson(value))
    }
}
