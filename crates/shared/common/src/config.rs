//! Shared configuration structures.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use domain::{
    ContainsDigit, LongerThan, NewUser, PasswordPolicySet, UserRole, DEFAULT_PASSWORD_MIN_LENGTH,
    REDACTED,
};

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServiceConfig {
    /// Get the full bind address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Password rules applied at registration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PasswordPolicyConfig {
    /// Passwords must be strictly longer than this
    pub min_length: usize,
    /// Require at least one digit
    pub require_digit: bool,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            require_digit: true,
        }
    }
}

impl PasswordPolicyConfig {
    /// Build the policy set in evaluation order (length first).
    pub fn build(&self) -> PasswordPolicySet {
        let policies = PasswordPolicySet::new().with(LongerThan(self.min_length));
        if self.require_digit {
            policies.with(ContainsDigit)
        } else {
            policies
        }
    }
}

/// Administrator account registered at startup.
#[derive(Clone, Deserialize, Serialize)]
pub struct AdminSeedConfig {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl std::fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("password", &REDACTED)
            .finish()
    }
}

impl AdminSeedConfig {
    /// Registration input for the seeded administrator (born at the Unix epoch).
    pub fn to_new_user(&self) -> NewUser {
        NewUser::new(
            self.username.clone(),
            self.name.clone(),
            NaiveDateTime::default(),
            self.password.as_str(),
        )
        .with_role(UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::PlainPassword;

    #[test]
    fn test_default_policy_requires_length_and_digit() {
        let policies = PasswordPolicyConfig::default().build();
        assert_eq!(policies.len(), 2);
        assert!(policies.validate(&PlainPassword::new("topsecret1")).is_ok());
        assert!(policies.validate(&PlainPassword::new("sdfsdfsdf")).is_err());
        assert!(policies.validate(&PlainPassword::new("secret1")).is_err());
    }

    #[test]
    fn test_policy_without_digit_requirement() {
        let config = PasswordPolicyConfig {
            min_length: 8,
            require_digit: false,
        };
        let policies = config.build();
        assert_eq!(policies.len(), 1);
        assert!(policies.validate(&PlainPassword::new("sdfsdfsdf")).is_ok());
    }

    #[test]
    fn test_admin_seed_becomes_admin_new_user() {
        let seed = AdminSeedConfig {
            username: "admin".to_string(),
            name: "admin".to_string(),
            password: "superSecretAdminPassword123".to_string(),
        };
        let new_user = seed.to_new_user();

        assert_eq!(new_user.role, UserRole::Admin);
        assert_eq!(new_user.birthdate, NaiveDateTime::default());
        assert!(!format!("{:?}", seed).contains("superSecret"));
    }
}
