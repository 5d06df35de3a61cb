//! User service configuration.

use std::env;

use common::PasswordPolicyConfig;
use domain::DEFAULT_PASSWORD_MIN_LENGTH;

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Rules every new password must satisfy
    pub password_policy: PasswordPolicyConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            password_policy: PasswordPolicyConfig {
                min_length: env::var("PASSWORD_MIN_LENGTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_PASSWORD_MIN_LENGTH),
                require_digit: env::var("PASSWORD_REQUIRE_DIGIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(true),
            },
        }
    }
}
