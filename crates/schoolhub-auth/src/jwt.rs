use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use schoolhub_config::JwtConfig;
use schoolhub_models::UserRole;
use thiserror::Error;
use uuid::Uuid;

use crate::claims::Claims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to create token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("Invalid or expired token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Creates an access token valid for `jwt_config.access_token_expiry` seconds.
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.access_token_expiry).max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        exp,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Encode)
}

/// Verifies signature and expiry and returns the embedded claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_verify() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, "teacher1", UserRole::Teacher, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "teacher1");
        assert_eq!(claims.role, UserRole::Teacher);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let config = test_config();
        let token =
            create_access_token(Uuid::new_v4(), "parent1", UserRole::Parent, &config).unwrap();

        let other = JwtConfig {
            secret: "another_secret".to_string(),
            ..config
        };
        assert!(matches!(
            verify_token(&token, &other),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_verify_expired_token() {
        // Default validation allows 60s of leeway.
        let config = JwtConfig {
            access_token_expiry: -120,
            ..test_config()
        };
        let token =
            create_access_token(Uuid::new_v4(), "student1", UserRole::Student, &config).unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_verify_garbage() {
        assert!(verify_token("not.a.token", &test_config()).is_err());
    }
}
