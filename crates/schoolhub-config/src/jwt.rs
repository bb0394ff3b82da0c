use std::env;

use crate::env_or;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", 86400), // 1 day
        }
    }
}

/// bcrypt work factor for stored credentials.
#[derive(Clone, Copy, Debug)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: env_or("BCRYPT_COST", Self::default().bcrypt_cost),
        }
    }
}
