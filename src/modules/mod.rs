pub mod classes;
pub mod communication;
pub mod users;
