//! # SchoolHub Config
//!
//! Configuration structures loaded from environment variables. Each struct
//! exposes `from_env()` and falls back to development defaults.
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: token signing and password hashing settings
//! - [`logging`]: log directory
//! - [`server`]: listen address
//!
//! ```ignore
//! use schoolhub_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! ```

use std::env;
use std::str::FromStr;

pub mod cors;
pub mod database;
pub mod jwt;
pub mod logging;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::{JwtConfig, PasswordConfig};
pub use logging::LoggingConfig;
pub use server::ServerConfig;

/// Every configuration section the server needs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            password: PasswordConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(),
        }
    }
}

/// Reads and parses `key`, falling back to `default` when unset or unparseable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads `key` as a non-empty string.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
