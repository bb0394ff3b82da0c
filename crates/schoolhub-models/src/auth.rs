//! Login and password reset DTOs.

use schoolhub_core::Sanitize;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::User;

/// Login request with username and password.
///
/// Missing fields deserialize as empty and fail authentication like any
/// other wrong credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "mrs.cohen")]
    pub username: String,
    #[schema(example = "secret123")]
    pub password: String,
}

impl Sanitize for LoginRequest {
    fn sanitize(self) -> Self {
        Self {
            username: self.username.sanitize(),
            ..self
        }
    }
}

/// Successful login: the user and a bearer token for later calls.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "newSecret123")]
    pub new_password: String,
}

impl Sanitize for ResetPasswordRequest {
    fn sanitize(self) -> Self {
        Self {
            username: self.username.sanitize(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
