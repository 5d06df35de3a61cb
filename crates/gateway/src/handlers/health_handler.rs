//! Health check handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use common::AppResult;
use user_service_lib::service::UserService;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Number of registered users
    pub users: usize,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let users = state.users.user_count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        users,
    }))
}
