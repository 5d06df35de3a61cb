//! API Gateway Library
//!
//! HTTP surface of the user registry: registration, Basic-authenticated
//! lookup and promotion, health and API docs.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use tracing::info;

use common::{AppError, AppResult};
use user_service_lib::build_service;
use user_service_lib::service::UserService;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Build application state, registering the seeded administrator if one
/// is configured.
pub async fn build_state(config: &GatewayConfig) -> AppResult<AppState> {
    let users = build_service(&config.user_service);

    if let Some(seed) = &config.admin_seed {
        let admin = users.register(seed.to_new_user()).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to seed administrator '{}': {}",
                seed.username, e
            ))
        })?;
        info!(uid = admin.uid, username = %admin.username(), "Administrator seeded");
    }

    Ok(AppState::new(users))
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> AppResult<()> {
    let state = build_state(&config).await?;
    let app = create_router(state);

    let addr = config.service.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!(service = %config.service.service_name, "Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
