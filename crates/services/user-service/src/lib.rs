//! User Service Library
//!
//! In-memory user registry: registration with password policies,
//! credential checks, role promotion and the access rules applied to
//! lookups and promotions.

pub mod access;
pub mod config;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use crate::config::UserServiceConfig;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

pub use access::{authorize_lookup, authorize_promotion, AccessGate, LookupTarget};

/// Build a user service backed by a fresh, empty in-memory store.
pub fn build_service(config: &UserServiceConfig) -> Arc<dyn UserService> {
    let policies = config.password_policy.build();
    info!(policies = ?policies.names(), "Password policies configured");

    let user_repo = Arc::new(UserStore::new());
    Arc::new(UserManager::new(user_repo, policies))
}
