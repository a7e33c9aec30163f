//! User management handlers (admin only).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::auth_handler::password_policy;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::MAX_ADDRESS_LENGTH;
use crate::domain::{UserResponse, UserRole, UserWithStore};
use crate::errors::AppResult;
use crate::types::{PaginationMeta, UserListQuery};

/// Admin user creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Sam Owner")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "sam@example.com")]
    pub email: String,
    #[validate(custom(function = password_policy))]
    #[schema(example = "Secret@123")]
    pub password: String,
    #[validate(length(min = 1, max = MAX_ADDRESS_LENGTH, message = "Address must be 1-400 characters"))]
    #[schema(example = "7 Side Street")]
    pub address: String,
    /// One of ADMIN, USER, STORE_OWNER; defaults to USER when omitted
    pub role: Option<UserRole>,
}

/// Paginated user listing
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserWithStore>,
    pub pagination: PaginationMeta,
}

/// Single-user envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserWithStore,
}

/// Envelope for a freshly created user
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUserResponse {
    pub user: UserResponse,
}

/// Create user management routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user))
}

/// List users with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(UserListQuery),
    responses(
        (status = 200, description = "Paginated user listing", body = UserListResponse),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<UserListResponse>> {
    require_admin(&current_user)?;

    let (users, total) = state.user_service.list_users(&query).await?;
    let pagination = PaginationMeta::new(&query.pagination(), total);

    Ok(Json(UserListResponse { users, pagination }))
}

/// Get a single user with owned-store enrichment
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User detail", body = UserEnvelope),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserEnvelope>> {
    require_admin(&current_user)?;

    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserEnvelope { user }))
}

/// Create a user with an explicit role
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreatedUserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreatedUserResponse>)> {
    require_admin(&current_user)?;

    let user = state
        .user_service
        .create_user(
            payload.name,
            payload.email,
            payload.password,
            payload.address,
            payload.role.unwrap_or(UserRole::User),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            user: UserResponse::from(user),
        }),
    ))
}
