//! # SchoolHub Core
//!
//! Core types, errors, and utilities shared by the SchoolHub crates.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`sanitize`]: Input sanitization for request text
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::{AppError, Sanitize, hash_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! let clean = String::from("  <b>hello</b> ").sanitize();
//! assert_eq!(clean, "bhello/b");
//! ```

pub mod errors;
pub mod password;
pub mod sanitize;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, FieldError, ValidationErrorResponse, field_errors};
pub use password::{hash_password, verify_password};
pub use sanitize::{Sanitize, sanitize_str};
