//! User data models and DTOs.
//!
//! - [`User`] - user entity as stored and returned (never carries the credential)
//! - [`UserRole`] - the four account roles
//! - [`RegisterRequest`] - self-registration body
//! - [`UpdateUserRequest`] - partial update body

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use schoolhub_core::Sanitize;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Account role.
///
/// Teachers own classes and carry a subject; everyone else is "other" as far
/// as the class workflows are concerned. Admins may act on behalf of any
/// teacher.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Teacher,
    #[default]
    Parent,
    Student,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Teacher => "teacher",
            UserRole::Parent => "parent",
            UserRole::Student => "student",
            UserRole::Admin => "admin",
        }
    }

    /// Whether `/register` may create an account with this role. Admin
    /// accounts come from `schoolhub-cli create-user`.
    pub fn allows_self_registration(&self) -> bool {
        !matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "teacher" => Ok(UserRole::Teacher),
            "parent" => Ok(UserRole::Parent),
            "student" => Ok(UserRole::Student),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!(
                "unknown role '{}', expected one of: teacher, parent, student, admin",
                other
            )),
        }
    }
}

/// A user in the system.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    /// Subject taught; only meaningful for teachers.
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration body.
///
/// Missing fields deserialize as empty so they surface as field errors
/// rather than a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 32, message = "Username must be between 3 and 32 characters"),
        custom(function = "validate_username")
    )]
    #[schema(example = "mrs.cohen")]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123")]
    pub password: String,
    pub role: UserRole,
    #[validate(length(max = 64, message = "Subject must be at most 64 characters"))]
    #[schema(example = "Mathematics")]
    pub subject: Option<String>,
}

impl Sanitize for RegisterRequest {
    fn sanitize(self) -> Self {
        Self {
            username: self.username.sanitize(),
            subject: self.subject.sanitize(),
            ..self
        }
    }
}

/// Partial user update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub role: Option<UserRole>,
    pub subject: Option<String>,
}

/// Usernames are letters, digits, `.`, `_` and `-`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_chars").with_message(
            "Username may only contain letters, digits, '.', '_' and '-'".into(),
        ))
    }
}
