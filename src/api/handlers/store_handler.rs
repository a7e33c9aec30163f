//! Store directory handlers.

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

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, require_role, CurrentUser};
use crate::api::AppState;
use crate::config::MAX_ADDRESS_LENGTH;
use crate::domain::{StoreDetail, StoreSummary, UserRole};
use crate::errors::AppResult;
use crate::types::{PaginationMeta, StoreListQuery};

/// Admin store creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Corner Grocery")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "contact@cornergrocery.example")]
    pub email: String,
    #[validate(length(min = 1, max = MAX_ADDRESS_LENGTH, message = "Address must be 1-400 characters"))]
    #[schema(example = "3 Market Square")]
    pub address: String,
    /// Existing user to assign as owner; promoted to STORE_OWNER
    pub owner_id: Option<Uuid>,
}

/// Paginated store listing
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreListResponse {
    pub stores: Vec<StoreSummary>,
    pub pagination: PaginationMeta,
}

/// Single-store envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreEnvelope {
    pub store: StoreDetail,
}

/// Create store routes
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores).post(create_store))
        // Literal segment registered before the :id capture
        .route("/my-store", get(my_store))
        .route("/:id", get(get_store))
}

/// Browse stores with the caller's own rating attached
#[utoipa::path(
    get,
    path = "/stores",
    tag = "Stores",
    security(("bearer_auth" = [])),
    params(StoreListQuery),
    responses(
        (status = 200, description = "Paginated store listing", body = StoreListResponse)
    )
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<StoreListQuery>,
) -> AppResult<Json<StoreListResponse>> {
    let (stores, total) = state
        .store_service
        .list_stores(&query, Some(current_user.id))
        .await?;
    let pagination = PaginationMeta::new(&query.pagination(), total);

    Ok(Json(StoreListResponse { stores, pagination }))
}

/// The store owned by the caller
#[utoipa::path(
    get,
    path = "/stores/my-store",
    tag = "Stores",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owned store detail", body = StoreEnvelope),
        (status = 403, description = "Store owner role required"),
        (status = 404, description = "No store assigned")
    )
)]
pub async fn my_store(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<StoreEnvelope>> {
    require_role(&current_user, &[UserRole::StoreOwner])?;

    let store = state.store_service.my_store(current_user.id).await?;
    Ok(Json(StoreEnvelope { store }))
}

/// Store detail with ratings and owner
#[utoipa::path(
    get,
    path = "/stores/{id}",
    tag = "Stores",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store detail", body = StoreEnvelope),
        (status = 404, description = "Store not found")
    )
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StoreEnvelope>> {
    let store = state.store_service.get_store(id).await?;
    Ok(Json(StoreEnvelope { store }))
}

/// Create a store, optionally assigning an owner
#[utoipa::path(
    post,
    path = "/stores",
    tag = "Stores",
    security(("bearer_auth" = [])),
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created", body = StoreEnvelope),
        (status = 400, description = "Validation error or owner not found"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Store email or owner already taken")
    )
)]
pub async fn create_store(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateStoreRequest>,
) -> AppResult<(StatusCode, Json<StoreEnvelope>)> {
    require_admin(&current_user)?;

    let store = state
        .store_service
        .create_store(payload.name, payload.email, payload.address, payload.owner_id)
        .await?;

    Ok((StatusCode::CREATED, Json(StoreEnvelope { store })))
}
