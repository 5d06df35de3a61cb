//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Identifiers
// =============================================================================

/// First uid handed out by an empty store
pub const FIRST_UID: u64 = 1;

// =============================================================================
// Validation
// =============================================================================

/// Passwords must be strictly longer than this many characters
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Placeholder printed instead of secret values
pub const REDACTED: &str = "[REDACTED]";
