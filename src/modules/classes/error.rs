use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassError {
    #[error("You can only act on your own classes")]
    Forbidden,
    #[error("Teacher is not assigned to class {0}")]
    NotAssigned(String),
    #[error("{0}")]
    Invalid(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
