//! Messages broadcast by a teacher to the parents of a class.

use chrono::{DateTime, Utc};
use schoolhub_core::Sanitize;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassMessage {
    pub id: Uuid,
    pub class_id: String,
    pub sender_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendClassMessageRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Class is required"))]
    #[schema(example = "3B")]
    pub class_id: String,
    pub sender_id: Uuid,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Message must be between 1 and 5000 characters"))]
    #[schema(example = "Parent meeting on Thursday at 18:00")]
    pub content: String,
}

impl Sanitize for SendClassMessageRequest {
    fn sanitize(self) -> Self {
        Self {
            class_id: self.class_id.sanitize(),
            content: self.content.sanitize(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassMessageSentResponse {
    pub message: String,
    pub class_message: ClassMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_content_is_invalid() {
        let json = format!(r#"{{"classId":"3B","senderId":"{}"}}"#, Uuid::new_v4());
        let request: SendClassMessageRequest = serde_json::from_str(&json).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn test_multiline_content_survives_sanitize() {
        let request = SendClassMessageRequest {
            class_id: "3B".to_string(),
            sender_id: Uuid::new_v4(),
            content: "Reminder:\r\nbring a coat\n".to_string(),
        }
        .sanitize();
        assert_eq!(request.content, "Reminder:\nbring a coat");
    }
}
