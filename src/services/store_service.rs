//! Store service - Directory listing, detail views and admin store
//! creation.
//!
//! All aggregates (`averageRating`, `totalRatings`) and the caller's
//! own rating are derived from the rating rows on every read.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    average_rating, OwnerSummary, RaterInfo, Rating, RatingWithRater, Store, StoreDetail,
    StoreSummary, UserRole,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::StoreListQuery;

/// Store service trait for dependency injection.
#[async_trait]
pub trait StoreService: Send + Sync {
    /// Filtered, sorted, paginated store listing. When
    /// `requesting_user_id` is given, each item carries that user's
    /// own rating of the store.
    async fn list_stores(
        &self,
        query: &StoreListQuery,
        requesting_user_id: Option<Uuid>,
    ) -> AppResult<(Vec<StoreSummary>, u64)>;

    /// Store detail with owner summary and full rating list
    async fn get_store(&self, id: Uuid) -> AppResult<StoreDetail>;

    /// The store owned by the caller, ratings newest-first
    async fn my_store(&self, owner_id: Uuid) -> AppResult<StoreDetail>;

    /// Admin store creation. Assigning an owner promotes that user
    /// to STORE_OWNER atomically with the store insert.
    async fn create_store(
        &self,
        name: String,
        email: String,
        address: String,
        owner_id: Option<Uuid>,
    ) -> AppResult<StoreDetail>;
}

/// Concrete implementation of StoreService using Unit of Work.
pub struct StoreManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StoreManager<U> {
    /// Create new store service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve rater identities for a set of ratings, newest-first
    /// order preserved from the input.
    async fn with_raters(&self, ratings: Vec<Rating>) -> AppResult<Vec<RatingWithRater>> {
        let user_ids: Vec<Uuid> = ratings.iter().map(|r| r.user_id).collect();
        let users = self.uow.users().find_by_ids(&user_ids).await?;
        let users_by_id: HashMap<Uuid, _> = users.into_iter().map(|u| (u.id, u)).collect();

        Ok(ratings
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
            .collect())
    }

    /// Assemble the full detail view for a store
    async fn detail(&self, store: Store) -> AppResult<StoreDetail> {
        let ratings = self.uow.ratings().list_for_store(store.id).await?;
        let values: Vec<i32> = ratings.iter().map(|r| r.value).collect();

        let owner = match store.owner_id {
            Some(owner_id) => {
                self.uow
                    .users()
                    .find_by_id(owner_id)
                    .await?
                    .map(|u| OwnerSummary {
                        id: u.id,
                        name: u.name,
                        email: u.email,
                    })
            }
            None => None,
        };

        let total = ratings.len() as u64;
        let with_raters = self.with_raters(ratings).await?;

        Ok(StoreDetail {
            id: store.id,
            name: store.name,
            email: store.email,
            address: store.address,
            created_at: store.created_at,
            owner,
            ratings: with_raters,
            average_rating: average_rating(&values),
            total_ratings: total,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> StoreService for StoreManager<U> {
    async fn list_stores(
        &self,
        query: &StoreListQuery,
        requesting_user_id: Option<Uuid>,
    ) -> AppResult<(Vec<StoreSummary>, u64)> {
        let (stores, total) = self.uow.stores().list(query).await?;

        let store_ids: Vec<Uuid> = stores.iter().map(|s| s.id).collect();
        let ratings = self.uow.ratings().list_for_stores(&store_ids).await?;

        let mut by_store: HashMap<Uuid, Vec<&Rating>> = HashMap::new();
        for rating in &ratings {
            by_store.entry(rating.store_id).or_default().push(rating);
        }

        let summaries = stores
            .into_iter()
            .map(|store| {
                let store_ratings = by_store.get(&store.id).map_or(&[][..], Vec::as_slice);
                let values: Vec<i32> = store_ratings.iter().map(|r| r.value).collect();
                let own = requesting_user_id.and_then(|uid| {
                    store_ratings.iter().find(|r| r.user_id == uid)
                });

                StoreSummary {
                    id: store.id,
                    name: store.name,
                    email: store.email,
                    address: store.address,
                    created_at: store.created_at,
                    average_rating: average_rating(&values),
                    total_ratings: values.len() as u64,
                    user_rating: own.map(|r| r.value),
                    user_rating_id: own.map(|r| r.id),
                }
            })
            .collect();

        Ok((summaries, total))
    }

    async fn get_store(&self, id: Uuid) -> AppResult<StoreDetail> {
        let store = self
            .uow
            .stores()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Store"))?;

        self.detail(store).await
    }

    async fn my_store(&self, owner_id: Uuid) -> AppResult<StoreDetail> {
        let store = self
            .uow
            .stores()
            .find_by_owner(owner_id)
            .await?
            .ok_or(AppError::NotFound("Store"))?;

        self.detail(store).await
    }

    async fn create_store(
        &self,
        name: String,
        email: String,
        address: String,
        owner_id: Option<Uuid>,
    ) -> AppResult<StoreDetail> {
        if self.uow.stores().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Store email already registered"));
        }

        let store = match owner_id {
            None => self.uow.stores().create(name, email, address).await?,
            Some(owner_id) => {
                let owner = self
                    .uow
                    .users()
                    .find_by_id(owner_id)
                    .await?
                    .ok_or_else(|| AppError::bad_request("Owner not found"))?;

                if self.uow.stores().find_by_owner(owner.id).await?.is_some() {
                    return Err(AppError::conflict("User already owns a store"));
                }

                // Promote the owner and insert the store atomically;
                // the unique owner index settles concurrent attempts.
                self.uow
                    .transaction(move |ctx| {
                        Box::pin(async move {
                            ctx.users().set_role(owner_id, UserRole::StoreOwner).await?;
                            ctx.stores()
                                .create(name, email, address, Some(owner_id))
                                .await
                        })
                    })
                    .await?
            }
        };

        self.detail(store).await
    }
}
