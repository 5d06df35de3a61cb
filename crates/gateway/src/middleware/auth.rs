//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};
use tracing::debug;

use common::{AppError, AppResult};
use domain::{PlainPassword, UserEntity};
use user_service_lib::service::UserService;

use crate::state::AppState;

/// User authenticated from the request's Basic credentials.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserEntity);

/// Authentication middleware that checks HTTP Basic credentials on every
/// request. There are no sessions.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (username, password) = extract_credentials(request.headers())?;

    let user = state.users.authenticate(&username, &password).await?;
    debug!(uid = user.uid, "Authenticated request");

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Extract username and password from the Authorization header.
fn extract_credentials(headers: &HeaderMap) -> AppResult<(String, PlainPassword)> {
    let Authorization(basic) = headers
        .typed_get::<Authorization<Basic>>()
        .ok_or(AppError::Unauthorized)?;

    Ok((
        basic.username().to_string(),
        PlainPassword::new(basic.password()),
    ))
}
