//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, dashboard_handler, rating_handler, store_handler, user_handler,
};
use crate::domain::{
    AuthUser, OwnedStoreSummary, OwnerSummary, RatedStore, RaterInfo, RatingWithRater,
    RatingWithStore, StoreDetail, StoreSummary, UserResponse, UserRole, UserWithStore,
};
use crate::services::PlatformStats;
use crate::types::{MessageResponse, PaginationMeta};

/// OpenAPI documentation for the Store Ratings API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store Ratings API",
        version = "0.1.0",
        description = "Store directory with per-user ratings, owner dashboards and admin management",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::signup,
        auth_handler::login,
        auth_handler::change_password,
        auth_handler::profile,
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        // Store endpoints
        store_handler::list_stores,
        store_handler::my_store,
        store_handler::get_store,
        store_handler::create_store,
        // Rating endpoints
        rating_handler::submit_rating,
        rating_handler::update_rating,
        rating_handler::my_ratings,
        rating_handler::store_ratings,
        // Dashboard endpoints
        dashboard_handler::stats,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            UserWithStore,
            AuthUser,
            OwnedStoreSummary,
            OwnerSummary,
            StoreSummary,
            StoreDetail,
            RaterInfo,
            RatedStore,
            RatingWithRater,
            RatingWithStore,
            PlatformStats,
            // Shared response types
            MessageResponse,
            PaginationMeta,
            // Auth types
            auth_handler::SignupRequest,
            auth_handler::LoginRequest,
            auth_handler::PasswordChangeRequest,
            auth_handler::AuthResponse,
            auth_handler::ProfileResponse,
            // User handler types
            user_handler::CreateUserRequest,
            user_handler::UserListResponse,
            user_handler::UserEnvelope,
            user_handler::CreatedUserResponse,
            // Store handler types
            store_handler::CreateStoreRequest,
            store_handler::StoreListResponse,
            store_handler::StoreEnvelope,
            // Rating handler types
            rating_handler::SubmitRatingRequest,
            rating_handler::UpdateRatingRequest,
            rating_handler::RatingResponse,
            rating_handler::RatingEnvelope,
            rating_handler::MyRatingsResponse,
            rating_handler::StoreRatingsResponse,
            // Dashboard handler types
            dashboard_handler::StatsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and account access"),
        (name = "Users", description = "Admin user management"),
        (name = "Stores", description = "Store directory and admin store creation"),
        (name = "Ratings", description = "Submitting and viewing ratings"),
        (name = "Dashboard", description = "Admin statistics")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
