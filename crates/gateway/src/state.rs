//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::service::UserService;
use user_service_lib::AccessGate;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub gate: AccessGate,
}

impl AppState {
    /// Create new app state around a user service.
    pub fn new(users: Arc<dyn UserService>) -> Self {
        let gate = AccessGate::new(users.clone());
        Self { users, gate }
    }
}
