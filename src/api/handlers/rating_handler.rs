//! Rating handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{Rating, RatingWithRater, RatingWithStore, UserRole};
use crate::errors::AppResult;

/// Rating submission request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    pub store_id: Uuid,
    /// Integer in [1, 5]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4)]
    pub rating: i32,
}

/// Rating revision request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRatingRequest {
    /// Integer in [1, 5]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 2)]
    pub rating: i32,
}

/// Rating wire shape
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub store_id: Uuid,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(r: Rating) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            store_id: r.store_id,
            rating: r.value,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Single-rating envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct RatingEnvelope {
    pub rating: RatingResponse,
}

/// The caller's rating history
#[derive(Debug, Serialize, ToSchema)]
pub struct MyRatingsResponse {
    pub ratings: Vec<RatingWithStore>,
}

/// A store's ratings as its owner sees them
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreRatingsResponse {
    pub ratings: Vec<RatingWithRater>,
    pub average_rating: Option<String>,
    pub total_ratings: u64,
}

/// Create rating routes
pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_rating))
        .route("/my-ratings", get(my_ratings))
        .route("/store/:store_id", get(store_ratings))
        .route("/:store_id", put(update_rating))
}

/// Submit a first rating for a store
#[utoipa::path(
    post,
    path = "/ratings",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    request_body = SubmitRatingRequest,
    responses(
        (status = 201, description = "Rating recorded", body = RatingEnvelope),
        (status = 400, description = "Validation error"),
        (status = 403, description = "USER role required"),
        (status = 404, description = "Store not found"),
        (status = 409, description = "Store already rated by this user")
    )
)]
pub async fn submit_rating(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<SubmitRatingRequest>,
) -> AppResult<(StatusCode, Json<RatingEnvelope>)> {
    require_role(&current_user, &[UserRole::User])?;

    let rating = state
        .rating_service
        .submit(current_user.id, payload.store_id, payload.rating)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RatingEnvelope {
            rating: RatingResponse::from(rating),
        }),
    ))
}

/// Revise the caller's rating of a store
#[utoipa::path(
    put,
    path = "/ratings/{storeId}",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("storeId" = Uuid, Path, description = "Store ID")),
    request_body = UpdateRatingRequest,
    responses(
        (status = 200, description = "Rating updated", body = RatingEnvelope),
        (status = 400, description = "Validation error"),
        (status = 403, description = "USER role required"),
        (status = 404, description = "Store or rating not found")
    )
)]
pub async fn update_rating(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRatingRequest>,
) -> AppResult<Json<RatingEnvelope>> {
    require_role(&current_user, &[UserRole::User])?;

    let rating = state
        .rating_service
        .update(current_user.id, store_id, payload.rating)
        .await?;

    Ok(Json(RatingEnvelope {
        rating: RatingResponse::from(rating),
    }))
}

/// The caller's own ratings, newest first
#[utoipa::path(
    get,
    path = "/ratings/my-ratings",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rating history", body = MyRatingsResponse),
        (status = 403, description = "USER role required")
    )
)]
pub async fn my_ratings(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<MyRatingsResponse>> {
    require_role(&current_user, &[UserRole::User])?;

    let ratings = state.rating_service.user_ratings(current_user.id).await?;
    Ok(Json(MyRatingsResponse { ratings }))
}

/// All ratings of one store, visible to its owner only
#[utoipa::path(
    get,
    path = "/ratings/store/{storeId}",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("storeId" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store rating list", body = StoreRatingsResponse),
        (status = 403, description = "Not the owner of this store")
    )
)]
pub async fn store_ratings(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<StoreRatingsResponse>> {
    require_role(&current_user, &[UserRole::StoreOwner])?;

    let result = state
        .rating_service
        .store_ratings(store_id, current_user.id)
        .await?;

    Ok(Json(StoreRatingsResponse {
        ratings: result.ratings,
        average_rating: result.average_rating,
        total_ratings: result.total_ratings,
    }))
}
