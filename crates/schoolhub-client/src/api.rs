use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use schoolhub_models::{
    ClassMessageSentResponse, HomeworkSentResponse, LoginRequest, LoginResponse,
    SendClassMessageRequest, SendHomeworkRequest,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ClientError, parse_error_body};
use crate::session::Session;

/// The endpoints the class screen calls.
#[async_trait]
pub trait ClassApi: Send + Sync {
    async fn teacher_classes(&self, token: &str, teacher_id: Uuid)
    -> Result<Vec<String>, ClientError>;

    async fn send_homework(
        &self,
        token: &str,
        request: &SendHomeworkRequest,
    ) -> Result<HomeworkSentResponse, ClientError>;

    async fn send_class_message(
        &self,
        token: &str,
        request: &SendClassMessageRequest,
    ) -> Result<ClassMessageSentResponse, ClientError>;
}

/// [`ClassApi`] over HTTP against a running server.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), %body, "Request rejected");
        Err(ClientError::Api {
            status: status.as_u16(),
            message: parse_error_body(&body),
        })
    }

    /// Logs in and returns the session to keep for later calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse =
            Self::send(self.http.post(self.url("/login")).json(&body)).await?;

        info!(user_id = %response.user.id, "Logged in");
        Ok(Session {
            token: response.token,
            user: response.user,
        })
    }
}

#[async_trait]
impl ClassApi for HttpClient {
    async fn teacher_classes(
        &self,
        token: &str,
        teacher_id: Uuid,
    ) -> Result<Vec<String>, ClientError> {
        let url = self.url(&format!("/api/attendance/teacher-classes/{}", teacher_id));
        Self::send(self.http.get(url).bearer_auth(token)).await
    }

    async fn send_homework(
        &self,
        token: &str,
        request: &SendHomeworkRequest,
    ) -> Result<HomeworkSentResponse, ClientError> {
        let url = self.url("/api/class/homework/send");
        Self::send(self.http.post(url).bearer_auth(token).json(request)).await
    }

    async fn send_class_message(
        &self,
        token: &str,
        request: &SendClassMessageRequest,
    ) -> Result<ClassMessageSentResponse, ClientError> {
        let url = self.url("/api/communication/send-class-message");
        Self::send(self.http.post(url).bearer_auth(token).json(request)).await
    }
}
