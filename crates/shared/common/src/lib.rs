//! Common utilities shared by the user service and the gateway.
//!
//! This crate provides:
//! - Unified error handling with HTTP response conversion
//! - Configuration structures
//! - Shared response bodies

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult, BASIC_REALM};
pub use response::MessageResponse;
