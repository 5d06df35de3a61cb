//! Gateway configuration.

use std::env;

use tracing::warn;

use common::{AdminSeedConfig, ServiceConfig};
use user_service_lib::config::UserServiceConfig;

/// Password used for the seeded administrator in debug builds when
/// `ADMIN_PASSWORD` is unset.
#[cfg(debug_assertions)]
const DEV_ADMIN_PASSWORD: &str = "superSecretAdminPassword123";

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address and logging defaults
    pub service: ServiceConfig,
    /// Registry settings (password policies)
    pub user_service: UserServiceConfig,
    /// Administrator registered at startup, if any
    pub admin_seed: Option<AdminSeedConfig>,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "gateway".to_string(),
                host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("GATEWAY_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            user_service: UserServiceConfig::from_env(),
            admin_seed: admin_seed_from_env(),
        }
    }

    /// Configuration with no seeded administrator.
    pub fn without_admin(mut self) -> Self {
        self.admin_seed = None;
        self
    }

    /// Replace the seeded administrator.
    pub fn with_admin(mut self, seed: AdminSeedConfig) -> Self {
        self.admin_seed = Some(seed);
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "gateway".to_string(),
                ..ServiceConfig::default()
            },
            user_service: UserServiceConfig::default(),
            admin_seed: None,
        }
    }
}

fn admin_seed_from_env() -> Option<AdminSeedConfig> {
    let username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let name = env::var("ADMIN_NAME").unwrap_or_else(|_| username.clone());

    let password = match env::var("ADMIN_PASSWORD") {
        Ok(password) => password,
        Err(_) => default_admin_password()?,
    };

    Some(AdminSeedConfig {
        username,
        name,
        password,
    })
}

#[cfg(debug_assertions)]
fn default_admin_password() -> Option<String> {
    warn!("ADMIN_PASSWORD not set, seeding admin with the development password");
    Some(DEV_ADMIN_PASSWORD.to_string())
}

#[cfg(not(debug_assertions))]
fn default_admin_password() -> Option<String> {
    warn!("ADMIN_PASSWORD not set, no administrator will be seeded");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_admin() {
        let config = GatewayConfig::default();
        assert!(config.admin_seed.is_none());
        assert_eq!(config.service.addr(), "0.0.0.0:3000");
        assert_eq!(config.user_service.password_policy.min_length, 8);
    }

    #[test]
    fn test_debug_redacts_admin_password() {
        let config = GatewayConfig::default().with_admin(AdminSeedConfig {
            username: "root".to_string(),
            name: "Root".to_string(),
            password: "hunter2hunter2".to_string(),
        });

        let debug = format!("{:?}", config);
        assert!(debug.contains("root"));
        assert!(!debug.contains("hunter2"));
        assert!(config.without_admin().admin_seed.is_none());
    }
}
