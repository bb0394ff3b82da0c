use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// A non-success response. `message` is what the server said, if anything.
    #[error("Server returned {status}")]
    Api { status: u16, message: Option<String> },
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid session file: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct FieldMessage {
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    errors: Option<Vec<FieldMessage>>,
}

/// Pulls a human readable message out of an error body.
///
/// Accepts `{"error": ..}`, `{"message": ..}` and the `{"errors": [..]}`
/// validation shape.
pub(crate) fn parse_error_body(body: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(body).ok()?;

    body.error.or(body.message).or_else(|| {
        body.errors
            .filter(|errors| !errors.is_empty())
            .map(|errors| {
                errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_body_shapes() {
        assert_eq!(
            parse_error_body(r#"{"error":"Invalid or expired token"}"#).as_deref(),
            Some("Invalid or expired token")
        );
        assert_eq!(
            parse_error_body(r#"{"message":"Class not found"}"#).as_deref(),
            Some("Class not found")
        );
        assert_eq!(
            parse_error_body(
                r#"{"errors":[{"field":"content","message":"Too short"},{"field":"classId","message":"Required"}]}"#
            )
            .as_deref(),
            Some("Too short, Required")
        );
        assert_eq!(parse_error_body(r#"{"errors":[]}"#), None);
        assert_eq!(parse_error_body("<html>"), None);
    }

    #[test]
    fn test_server_message() {
        let err = ClientError::Api {
            status: 403,
            message: Some("No".to_string()),
        };
        assert_eq!(err.server_message(), Some("No"));
        assert_eq!(err.to_string(), "Server returned 403");
    }
}
