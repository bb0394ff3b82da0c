use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use schoolhub_core::{AppError, ErrorResponse, FieldError, Sanitize, ValidationErrorResponse};
use schoolhub_models::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ResetPasswordRequest,
    UpdateUserRequest, User,
};
use tracing::{error, info, instrument, warn};

use crate::state::AppState;
use crate::validator::{JsonBody, SanitizedJson, ValidatedJson};

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid fields or username taken", body = ValidationErrorResponse),
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let dto = dto.sanitize();
    if !dto.role.allows_self_registration() {
        warn!(username = %dto.username, role = %dto.role, "Registration with a reserved role");
        return Err(AppError::validation(vec![FieldError {
            field: "role".to_string(),
            message: format!("Accounts with the {} role cannot be self-registered", dto.role),
        }]));
    }

    info!(username = %dto.username, role = %dto.role, "Registration attempt");

    match state.users.create_user(dto).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "User registered");
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(e) => {
            error!(error = %e, "Registration failed");
            Err(AppError::bad_request(e))
        }
    }
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let dto = dto.sanitize();
    let username = dto.username.clone();

    match state.users.login(dto).await {
        Ok(response) => {
            info!(user_id = %response.user.id, %username, "Login successful");
            Ok(Json(response))
        }
        Err(e) => {
            warn!(%username, error = %e, "Login failed");
            Err(AppError::unauthorized(e))
        }
    }
}

/// Set a new password for a username
#[utoipa::path(
    post,
    path = "/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid fields or unknown user", body = ErrorResponse),
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    SanitizedJson(dto): SanitizedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let username = dto.username.clone();

    match state.users.reset_password(dto).await {
        Ok(()) => {
            info!(%username, "Password reset");
            Ok(Json(MessageResponse {
                message: "Password has been reset successfully".to_string(),
            }))
        }
        Err(e) => {
            error!(%username, error = %e, "Password reset failed");
            Err(AppError::bad_request(e))
        }
    }
}

/// List every user
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.users.get_all_users().await.map_err(|e| {
        error!(error = %e, "Failed to list users");
        AppError::internal(e)
    })?;

    Ok(Json(users))
}

/// Update a user's username, role or subject
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 500, description = "Update failed", body = ErrorResponse),
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(dto): JsonBody<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    match state.users.update_user(&id, dto).await {
        Ok(user) => {
            info!(user_id = %user.id, "User updated");
            Ok(Json(user))
        }
        Err(e) => {
            error!(error = %e, "User update failed");
            Err(AppError::internal(anyhow!("Server error during user update")))
        }
    }
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Delete failed", body = ErrorResponse),
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    match state.users.delete_user(&id).await {
        Ok(()) => {
            info!("User deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            error!(error = %e, "User delete failed");
            Err(AppError::bad_request(e))
        }
    }
}
