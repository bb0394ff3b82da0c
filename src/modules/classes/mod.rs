pub mod controller;
pub mod error;
pub mod repository;
pub mod router;
pub mod service;

pub use error::ClassError;
pub use router::{init_attendance_router, init_homework_router};
