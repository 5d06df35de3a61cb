//! HTTP request handlers.

pub mod health_handler;
pub mod user_handler;

pub use health_handler::health_routes;
pub use user_handler::{protected_user_routes, public_user_routes};
