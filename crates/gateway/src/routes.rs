//! Route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health_routes, protected_user_routes, public_user_routes};
use crate::middleware::basic_auth_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .merge(health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Registration (no auth)
        .merge(public_user_routes())
        // Lookup and promotion (Basic credentials on every request)
        .merge(protected_user_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_middleware,
        )))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
