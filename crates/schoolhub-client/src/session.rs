use std::path::Path;

use schoolhub_models::User;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;

/// The logged-in user and their bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn subject(&self) -> Option<&str> {
        self.user.subject.as_deref()
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let session = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), "Session loaded");
        Ok(session)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ClientError> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, raw).await?;
        debug!(path = %path.display(), "Session saved");
        Ok(())
    }
}
