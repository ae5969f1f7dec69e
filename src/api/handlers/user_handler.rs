//! Staff account handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::ROLE_STAFF;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::CreateUser;
use crate::types::{Created, StatusMessage};

fn default_role() -> String {
    ROLE_STAFF.to_string()
}

/// New account request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Username must be 3 to 100 characters"
    ))]
    #[schema(example = "attendant1")]
    pub username: String,
    #[validate(length(
        min = 6,
        message = "Password must be at least 6 characters"
    ))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Full name is required"
    ))]
    #[schema(example = "Alice Uwase")]
    pub full_name: String,
    /// staff | admin (defaults to staff)
    #[serde(default = "default_role")]
    #[schema(example = "staff")]
    pub role: String,
}

/// Account routes (behind authentication)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/me", get(get_current_user))
}

/// Create a staff account (admin only)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User created", body = StatusMessage),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<StatusMessage>> {
    require_admin(&current_user)?;

    state
        .user_service
        .create_user(CreateUser {
            username: payload.username,
            password: payload.password,
            full_name: payload.full_name,
            role: payload.role,
        })
        .await?;

    Ok(Created(StatusMessage::ok("User created successfully")))
}

/// Get the logged-in account
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}
