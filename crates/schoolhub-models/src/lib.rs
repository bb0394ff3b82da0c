//! # SchoolHub Models
//!
//! Domain entities and request/response DTOs shared by the server and the
//! class screen client. JSON bodies use camelCase keys.
//!
//! - [`auth`]: login and password reset
//! - [`classes`]: homework
//! - [`communication`]: class messages
//! - [`users`]: users and roles

pub mod auth;
pub mod classes;
pub mod communication;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, ResetPasswordRequest};
pub use classes::{Homework, HomeworkSentResponse, SendHomeworkRequest};
pub use communication::{ClassMessage, ClassMessageSentResponse, SendClassMessageRequest};
pub use users::{RegisterRequest, UpdateUserRequest, User, UserRole};
