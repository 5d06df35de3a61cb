//! User handlers.

use axum::{
    extract::{rejection::QueryRejection, Extension, Query, State},
    response::Json,
    routing::post,
    Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppError, AppResult, MessageResponse};
use domain::{NewUser, PlainPassword, Uid, UserResponse};
use user_service_lib::service::UserService;
use user_service_lib::LookupTarget;

use crate::extractors::ValidatedJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Unique login name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "imashevchenko")]
    pub username: String,
    /// Display name
    #[schema(example = "Arsenii")]
    pub name: String,
    /// Date of birth (ISO-8601, no offset)
    #[schema(value_type = String, example = "2002-04-22T20:30:00")]
    pub birthdate: NaiveDateTime,
    /// Password, checked against the configured policies
    #[schema(value_type = String, example = "topsecret1")]
    pub password: PlainPassword,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        // Always a regular user; any role in the body was never deserialized
        NewUser::new(
            request.username,
            request.name,
            request.birthdate,
            request.password,
        )
    }
}

/// Selects the user to look up; exactly one field must be set.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// User id
    pub id: Option<Uid>,
    /// Username
    pub username: Option<String>,
}

/// Selects the user to promote.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PromoteQuery {
    /// User id
    pub id: Uid,
}

/// Routes that need no credentials
pub fn public_user_routes() -> Router<AppState> {
    Router::new().route("/user-register", post(register))
}

/// Routes behind Basic authentication
pub fn protected_user_routes() -> Router<AppState> {
    Router::new()
        .route("/user-get", post(get_user))
        .route("/user-promote", post(promote_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/user-register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid password, duplicate username or malformed body")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.register(payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Get a user by id or username (self, or anyone for admins)
#[utoipa::path(
    post,
    path = "/user-get",
    tag = "Users",
    security(("basic_auth" = [])),
    params(UserQuery),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "Neither or both of id and username given"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Forbidden - Can only view own profile unless admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> AppResult<Json<UserResponse>> {
    let Query(query) = query.map_err(|e| AppError::bad_request(e.body_text()))?;
    let target = LookupTarget::from_query(query.id, query.username)?;

    let user = state.gate.lookup(&caller, &target).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Promote a user to admin (admin only)
#[utoipa::path(
    post,
    path = "/user-promote",
    tag = "Users",
    security(("basic_auth" = [])),
    params(PromoteQuery),
    responses(
        (status = 200, description = "User promoted", body = MessageResponse),
        (status = 400, description = "Missing or unknown user id"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn promote_user(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<AppState>,
    query: Result<Query<PromoteQuery>, QueryRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Query(query) = query.map_err(|e| AppError::bad_request(e.body_text()))?;

    state.gate.promote(&caller, query.id).await?;
    Ok(Json(MessageResponse::new(format!(
        "User {} promoted to admin",
        query.id
    ))))
}
