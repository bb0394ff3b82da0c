use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Username already exists")]
    UsernameTaken,
    #[error("User not found")]
    NotFound,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Invalid user id")]
    InvalidId,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
