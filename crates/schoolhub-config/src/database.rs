use crate::{env_opt, env_or};

/// PostgreSQL settings.
///
/// When `DATABASE_URL` is unset the server runs on in-memory stores.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_opt("DATABASE_URL"),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
        }
    }
}
