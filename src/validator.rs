use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use schoolhub_core::{AppError, Sanitize};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::Validate;

fn rejection_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if error_msg.contains("invalid type") || error_msg.contains("unknown variant") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

/// `Json` with the rejection rendered as an `{"error": ...}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        Ok(JsonBody(value))
    }
}

fn validated<T: Validate>(value: T) -> Result<T, AppError> {
    value.validate().map_err(|errors| {
        let err = AppError::from_validation(&errors);
        warn!(error = %err.error, "Request validation failed");
        err
    })?;
    Ok(value)
}

/// Deserializes and validates a JSON body as sent.
///
/// Validation failures become a 400 listing every failed field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        Ok(ValidatedJson(validated(value)?))
    }
}

/// Deserializes, sanitizes, then validates a JSON body.
///
/// Length rules apply to the sanitized text, so a field that only held
/// markup fails as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SanitizedJson<T>(pub T);

impl<T, S> FromRequest<S> for SanitizedJson<T>
where
    T: DeserializeOwned + Validate + Sanitize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        Ok(SanitizedJson(validated(value.sanitize())?))
    }
}
