//! Application services for the user registry.

mod user_service;

pub use user_service::{UserManager, UserService};
