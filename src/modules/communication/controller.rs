use axum::{Json, extract::State, http::StatusCode};
use schoolhub_core::{AppError, ErrorResponse, ValidationErrorResponse};
use schoolhub_models::{ClassMessageSentResponse, SendClassMessageRequest};
use tracing::{info, instrument};

use crate::middleware::auth::AuthUser;
use crate::modules::classes::controller::class_error;
use crate::state::AppState;
use crate::validator::SanitizedJson;

/// Send a message to all parents of a class
#[utoipa::path(
    post,
    path = "/api/communication/send-class-message",
    request_body = SendClassMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = ClassMessageSentResponse),
        (status = 400, description = "Invalid fields", body = ValidationErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not assigned to this class", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Communication"
)]
#[instrument(skip_all)]
pub async fn send_class_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    SanitizedJson(dto): SanitizedJson<SendClassMessageRequest>,
) -> Result<(StatusCode, Json<ClassMessageSentResponse>), AppError> {
    let class_message = state
        .communication
        .send_class_message(&auth_user.0, dto)
        .await
        .map_err(class_error)?;

    info!(
        message_id = %class_message.id,
        class_id = %class_message.class_id,
        "Class message sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(ClassMessageSentResponse {
            message: "Message sent to all parents in the class".to_string(),
            class_message,
        }),
    ))
}
