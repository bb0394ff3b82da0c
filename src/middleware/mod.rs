//! Request extractors for cross-cutting concerns.
//!
//! - [`auth`]: bearer token authentication
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn handler(auth_user: AuthUser) -> Result<impl IntoResponse, AppError> {
//!     let user_id = auth_user.user_id()?;
//!     // ...
//! }
//! ```

pub mod auth;
