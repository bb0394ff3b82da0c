pub mod controller;
pub mod error;
pub mod repository;
pub mod router;
pub mod service;

pub use error::UserError;
pub use router::init_users_router;
