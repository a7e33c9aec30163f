//! Rating service - Submitting and revising ratings, plus the two
//! rating list views (store owner's raters, a user's own history).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{MAX_RATING, MIN_RATING};
use crate::domain::{
    average_rating, RatedStore, RaterInfo, Rating, RatingWithRater, RatingWithStore,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Ratings of one store as its owner sees them
#[derive(Debug)]
pub struct StoreRatings {
    pub ratings: Vec<RatingWithRater>,
    pub average_rating: Option<String>,
    pub total_ratings: u64,
}

/// Rating service trait for dependency injection.
#[async_trait]
pub trait RatingService: Send + Sync {
    /// Submit a first rating for a store; conflicts if the user has
    /// already rated it
    async fn submit(&self, user_id: Uuid, store_id: Uuid, value: i32) -> AppResult<Rating>;

    /// Revise an existing rating
    async fn update(&self, user_id: Uuid, store_id: Uuid, value: i32) -> AppResult<Rating>;

    /// All ratings of a store, gated to its owner
    async fn store_ratings(&self, store_id: Uuid, owner_id: Uuid) -> AppResult<StoreRatings>;

    /// All ratings placed by a user, newest first
    async fn user_ratings(&self, user_id: Uuid) -> AppResult<Vec<RatingWithStore>>;
}

fn check_value(value: i32) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(AppError::validation(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

/// Concrete implementation of RatingService using Unit of Work.
pub struct RatingDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RatingDesk<U> {
    /// Create new rating service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RatingService for RatingDesk<U> {
    async fn submit(&self, user_id: Uuid, store_id: Uuid, value: i32) -> AppResult<Rating> {
        check_value(value)?;

        if self.uow.stores().find_by_id(store_id).await?.is_none() {
            return Err(AppError::NotFound("Store"));
        }

        if self
            .uow
            .ratings()
            .find_by_user_and_store(user_id, store_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "You have already rated this store. Use update to modify.",
            ));
        }

        // The unique (user, store) index catches a concurrent first
        // submission that slipped past the check above.
        self.uow.ratings().create(user_id, store_id, value).await
    }

    async fn update(&self, user_id: Uuid, store_id: Uuid, value: i32) -> AppResult<Rating> {
        check_value(value)?;

        if self.uow.stores().find_by_id(store_id).await?.is_none() {
            return Err(AppError::NotFound("Store"));
        }

        self.uow
            .ratings()
            .update_value(user_id, store_id, value)
            .await
    }

    async fn store_ratings(&self, store_id: Uuid, owner_id: Uuid) -> AppResult<StoreRatings> {
        let store = self.uow.stores().find_by_id(store_id).await?;

        // A missing store and someone else's store answer the same
        // way, so the endpoint does not leak which stores exist.
        let owned = store
            .as_ref()
            .map(|s| s.owner_id == Some(owner_id))
            .unwrap_or(false);
        if !owned {
            return Err(AppError::Forbidden);
        }

        let ratings = self.uow.ratings().list_for_store(store_id).await?;
        let values: Vec<i32> = ratings.iter().map(|r| r.value).collect();

        let user_ids: Vec<Uuid> = ratings.iter().map(|r| r.user_id).collect();
        let users = self.uow.users().find_by_ids(&user_ids).await?;
        let users_by_id: HashMap<Uuid, _> = users.into_iter().map(|u| (u.id, u)).collect();

        let with_raters = ratings
            .into_iter()
            .filter_map(|r| {
                users_by_id.get(&r.user_id).map(|u| RatingWithRater {
                    id: r.id,
                    rating: r.value,
                    user: RaterInfo {
                        id: u.id,
                        name: u.name.clone(),
                        email: u.email.clone(),
                    },
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
            })
            .collect();

        Ok(StoreRatings {
            ratings: with_raters,
            average_rating: average_rating(&values),
            total_ratings: values.len() as u64,
        })
    }

    async fn user_ratings(&self, user_id: Uuid) -> AppResult<Vec<RatingWithStore>> {
        let ratings = self.uow.ratings().list_for_user(user_id).await?;

        let store_ids: Vec<Uuid> = ratings.iter().map(|r| r.store_id).collect();
        let stores = self.uow.stores().find_by_ids(&store_ids).await?;
        let stores_by_id: HashMap<Uuid, _> = stores.into_iter().map(|s| (s.id, s)).collect();

        Ok(ratings
            .into_iter()
            .filter_map(|r| {
                stores_by_id.get(&r.store_id).map(|s| RatingWithStore {
                    id: r.id,
                    rating: r.value,
                    store: RatedStore {
                        id: s.id,
                        name: s.name.clone(),
                        address: s.address.clone(),
                    },
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
            })
            .collect())
    }
}
