//! Domain-level errors.
//!
//! These errors represent business rule violations in the user registry.
//! They are independent of infrastructure concerns (HTTP, storage).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
///
/// A failed operation leaves the registry unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Password rejected by a policy; carries the unmet requirement
    #[error("Password must be {0}")]
    InvalidPassword(String),

    /// Username is already registered
    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    /// Missing or incorrect credentials
    #[error("Invalid credentials")]
    Unauthorized,

    /// Authenticated but not allowed
    #[error("Forbidden")]
    Forbidden,

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request target or unknown argument
    #[error("{0}")]
    BadRequest(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create an invalid password error
    pub fn invalid_password(requirement: impl Into<String>) -> Self {
        DomainError::InvalidPassword(requirement.into())
    }

    /// Create a duplicate user error
    pub fn duplicate_user(username: impl Into<String>) -> Self {
        DomainError::DuplicateUser(username.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a bad request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        DomainError::BadRequest(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
