//! # SchoolHub Auth
//!
//! JWT access tokens issued at login and checked on bearer-authenticated
//! endpoints.
//!
//! ```ignore
//! use schoolhub_auth::{create_access_token, verify_token};
//!
//! let token = create_access_token(user.id, &user.username, user.role, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! assert_eq!(claims.sub, user.id.to_string());
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, verify_token};
