use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use schoolhub_core::{AppError, ErrorResponse, ValidationErrorResponse};
use schoolhub_models::{HomeworkSentResponse, SendHomeworkRequest};
use tracing::{error, info, instrument, warn};

use super::error::ClassError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::SanitizedJson;

/// Status mapping shared by the class and communication endpoints.
pub(crate) fn class_error(e: ClassError) -> AppError {
    match e {
        ClassError::Forbidden | ClassError::NotAssigned(_) => {
            warn!(error = %e, "Class action forbidden");
            AppError::forbidden(e)
        }
        ClassError::Invalid(_) => AppError::bad_request(e),
        ClassError::Database(_) | ClassError::Internal(_) => {
            error!(error = %e, "Class action failed");
            AppError::internal(e)
        }
    }
}

/// List the classes assigned to a teacher
#[utoipa::path(
    get,
    path = "/api/attendance/teacher-classes/{id}",
    params(("id" = String, Path, description = "Teacher user ID")),
    responses(
        (status = 200, description = "Class names, sorted", body = Vec<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not this teacher", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_teacher_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let classes = state
        .classes
        .teacher_classes(&auth_user.0, &id)
        .await
        .map_err(class_error)?;

    Ok(Json(classes))
}

/// Send homework to the parents of a class
#[utoipa::path(
    post,
    path = "/api/class/homework/send",
    request_body = SendHomeworkRequest,
    responses(
        (status = 201, description = "Homework stored", body = HomeworkSentResponse),
        (status = 400, description = "Invalid fields", body = ValidationErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not assigned to this class", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip_all)]
pub async fn send_homework(
    State(state): State<AppState>,
    auth_user: AuthUser,
    SanitizedJson(dto): SanitizedJson<SendHomeworkRequest>,
) -> Result<(StatusCode, Json<HomeworkSentResponse>), AppError> {
    let homework = state
        .classes
        .send_homework(&auth_user.0, dto)
        .await
        .map_err(class_error)?;

    info!(
        homework_id = %homework.id,
        class_id = %homework.class_id,
        teacher_id = %homework.teacher_id,
        "Homework sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(HomeworkSentResponse {
            message: "Homework sent to parents".to_string(),
            homework,
        }),
    ))
}
