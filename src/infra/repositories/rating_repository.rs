//! Rating repository.
//!
//! The one-rating-per-user-per-store invariant lives in the unique
//! `(user_id, store_id)` index; `create` surfaces a lost race as a
//! conflict rather than an internal error.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::rating::{self, ActiveModel, Entity as RatingEntity};
use crate::domain::Rating;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Rating repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Find the rating a user placed on a store, if any
    async fn find_by_user_and_store(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> AppResult<Option<Rating>>;

    /// Insert a new rating; conflicts when the pair already exists
    async fn create(&self, user_id: Uuid, store_id: Uuid, value: i32) -> AppResult<Rating>;

    /// Overwrite the value of an existing rating, bumping updated_at
    async fn update_value(&self, user_id: Uuid, store_id: Uuid, value: i32) -> AppResult<Rating>;

    /// All ratings of one store, newest first
    async fn list_for_store(&self, store_id: Uuid) -> AppResult<Vec<Rating>>;

    /// All ratings of any of the given stores (unordered)
    async fn list_for_stores(&self, store_ids: &[Uuid]) -> AppResult<Vec<Rating>>;

    /// All ratings placed by a user, newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Rating>>;

    /// Count all ratings
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of RatingRepository
pub struct RatingStore {
    db: DatabaseConnection,
}

impl RatingStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingStore {
    async fn find_by_user_and_store(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> AppResult<Option<Rating>> {
        let result = RatingEntity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .filter(rating::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Rating::from))
    }

    async fn create(&self, user_id: Uuid, store_id: Uuid, value: i32) -> AppResult<Rating> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            store_id: Set(store_id),
            rating: Set(value),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            match e.sql_err() {
                // Two concurrent submissions for the same pair: the
                // loser lands here
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::conflict("You have already rated this store. Use update to modify.")
                }
                _ => AppError::from(e),
            }
        })?;

        Ok(Rating::from(model))
    }

    async fn update_value(&self, user_id: Uuid, store_id: Uuid, value: i32) -> AppResult<Rating> {
        let existing = RatingEntity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .filter(rating::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("Rating"))?;

        let mut active: ActiveModel = existing.into();
        active.rating = Set(value);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Rating::from(model))
    }

    async fn list_for_store(&self, store_id: Uuid) -> AppResult<Vec<Rating>> {
        let models = RatingEntity::find()
            .filter(rating::Column::StoreId.eq(store_id))
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn list_for_stores(&self, store_ids: &[Uuid]) -> AppResult<Vec<Rating>> {
        if store_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = RatingEntity::find()
            .filter(rating::Column::StoreId.is_in(store_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Rating>> {
        let models = RatingEntity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        RatingEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
