//! Homework records and the homework send request.

use chrono::{DateTime, Utc};
use schoolhub_core::Sanitize;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Homework posted by a teacher to a class.
///
/// `class_id` is the class name, as returned by the teacher-classes endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    pub id: Uuid,
    pub class_id: String,
    pub teacher_id: Uuid,
    pub subject: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendHomeworkRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Class is required"))]
    #[schema(example = "3B")]
    pub class_id: String,
    pub teacher_id: Uuid,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Subject must be between 1 and 100 characters"))]
    #[schema(example = "Homework")]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Homework content must be between 1 and 5000 characters"))]
    #[schema(example = "Exercises 1-4 on page 12")]
    pub content: String,
}

impl Sanitize for SendHomeworkRequest {
    fn sanitize(self) -> Self {
        Self {
            class_id: self.class_id.sanitize(),
            subject: self.subject.sanitize(),
            content: self.content.sanitize(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeworkSentResponse {
    pub message: String,
    pub homework: Homework,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_client_payload() {
        let teacher_id = Uuid::new_v4();
        let json = format!(
            r#"{{"classId":"3B","teacherId":"{}","subject":"Homework","content":"Page 12"}}"#,
            teacher_id
        );
        let request: SendHomeworkRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.class_id, "3B");
        assert_eq!(request.teacher_id, teacher_id);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_content_is_invalid() {
        let request = SendHomeworkRequest {
            class_id: "3B".to_string(),
            teacher_id: Uuid::new_v4(),
            subject: "Homework".to_string(),
            content: String::new(),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("content"));
        assert!(!fields.contains_key("class_id"));
    }

    #[test]
    fn test_sanitize() {
        let request = SendHomeworkRequest {
            class_id: " 3B ".to_string(),
            teacher_id: Uuid::new_v4(),
            subject: "Homework".to_string(),
            content: "<i>Read</i> chapter 2\n".to_string(),
        }
        .sanitize();
        assert_eq!(request.class_id, "3B");
        assert_eq!(request.content, "iRead/i chapter 2");
    }
}
