#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fake::Fake;
use fake::faker::internet::en::Username;
use http_body_util::BodyExt;
use schoolhub::router::init_router;
use schoolhub::state::{AppState, Stores};
use schoolhub_config::{CorsConfig, JwtConfig, PasswordConfig};
use schoolhub_models::{LoginRequest, RegisterRequest, User, UserRole};
use serde_json::Value;
use tower::ServiceExt;

pub fn test_state() -> AppState {
    AppState::new(
        Stores::in_memory(),
        JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            access_token_expiry: 3600,
        },
        PasswordConfig { bcrypt_cost: 4 },
        CorsConfig::default(),
    )
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = test_state();
        Self {
            router: init_router(state.clone()),
            state,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.request(json_request("POST", uri, body, token)).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Registers a user through the service and logs them in.
    pub async fn user_with_token(&self, role: UserRole) -> (User, String) {
        let username = unique_username();
        let password = "secret123".to_string();
        self.state
            .users
            .create_user(RegisterRequest {
                username: username.clone(),
                password: password.clone(),
                role,
                subject: Some("Mathematics".to_string()),
            })
            .await
            .unwrap();
        let response = self
            .state
            .users
            .login(LoginRequest { username, password })
            .await
            .unwrap();
        (response.user, response.token)
    }
}

pub fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// A valid, unique username.
pub fn unique_username() -> String {
    let base: String = Username().fake();
    let base: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .take(16)
        .collect();
    format!("{}_{}", base, &uuid::Uuid::new_v4().simple().to_string()[..8])
}
