//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::health_handler::HealthResponse;
use crate::handlers::user_handler::RegisterRequest;
use common::MessageResponse;
use domain::{UserResponse, UserRole};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::register,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::promote_user,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            RegisterRequest,
            UserResponse,
            UserRole,
            MessageResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, lookup and promotion"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
