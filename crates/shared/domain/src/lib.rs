//! Domain layer - Core user registry entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Types here are shared by the user service and the HTTP gateway.

pub mod constants;
pub mod error;
pub mod password;
pub mod policy;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Password, PlainPassword};
pub use policy::{ContainsDigit, LongerThan, PasswordPolicy, PasswordPolicySet};
pub use user::{NewUser, Uid, UserEntity, UserInfo, UserResponse, UserRole};
