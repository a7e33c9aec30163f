//! Store domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::rating::RatingWithRater;

/// Store domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    /// At most one store per owner; `None` for unowned stores
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner identity carried in store detail views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Store list item with derived aggregates and, when the request is
/// authenticated, the caller's own rating of the store.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub average_rating: Option<String>,
    pub total_ratings: u64,
    pub user_rating: Option<i32>,
    pub user_rating_id: Option<Uuid>,
}

/// Full store view: owner plus the complete rating list
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDetail {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub owner: Option<OwnerSummary>,
    pub ratings: Vec<RatingWithRater>,
    pub average_rating: Option<String>,
    pub total_ratings: u64,
}
