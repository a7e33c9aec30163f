//! Authentication handlers.

use axum::{
    extract::State, http::StatusCode, response::Json, routing::get, routing::post, Extension,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::MAX_ADDRESS_LENGTH;
use crate::domain::{password, AuthUser, UserWithStore};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Password-policy check usable as a validator derive function
pub(crate) fn password_policy(value: &str) -> Result<(), ValidationError> {
    password::check_policy(value).map_err(|msg| {
        let mut err = ValidationError::new("password_policy");
        err.message = Some(msg.into());
        err
    })
}

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Customer")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Password: 8-16 chars, at least one uppercase and one special
    #[validate(custom(function = password_policy))]
    #[schema(example = "Secret@123")]
    pub password: String,
    /// Postal address
    #[validate(length(min = 1, max = MAX_ADDRESS_LENGTH, message = "Address must be 1-400 characters"))]
    #[schema(example = "12 Main Street")]
    pub address: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "Secret@123")]
    pub password: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    /// The password currently in effect
    pub current_password: String,
    /// Replacement password, same policy as signup
    #[validate(custom(function = password_policy))]
    pub new_password: String,
}

/// Token plus the authenticated user
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Profile envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserWithStore,
}

/// Create authentication routes (public half)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Authenticated /auth routes (password change, profile)
pub fn auth_protected_routes() -> Router<AppState> {
    Router::new()
        .route("/password", axum::routing::put(change_password))
        .route("/profile", get(profile))
}

/// Register a new account; the role is always USER
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let (user, token) = state
        .auth_service
        .signup(payload.name, payload.email, payload.password, payload.address)
        .await?;

    let response = AuthResponse {
        token,
        user: AuthUser::from(&user),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login and get a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (user, token) = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(AuthResponse {
        token,
        user: AuthUser::from(&user),
    }))
}

/// Change the caller's password
#[utoipa::path(
    put,
    path = "/auth/password",
    tag = "Authentication",
    request_body = PasswordChangeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Current password is incorrect")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<PasswordChangeRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .change_password(
            current_user.id,
            payload.current_password,
            payload.new_password,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// The caller's own profile, with owned store if any
#[utoipa::path(
    get,
    path = "/auth/profile",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;
    Ok(Json(ProfileResponse { user }))
}
