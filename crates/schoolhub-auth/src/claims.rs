use schoolhub_models::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub role: UserRole,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The subject as a UUID, if it parses.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            username: "teacher1".to_string(),
            role: UserRole::Teacher,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""role":"teacher""#));
    }

    #[test]
    fn test_user_id() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            username: "admin".to_string(),
            role: UserRole::Admin,
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id(), Some(id));
        assert!(claims.is_admin());

        let bad = Claims {
            sub: "not-a-uuid".to_string(),
            ..claims
        };
        assert_eq!(bad.user_id(), None);
    }
}
