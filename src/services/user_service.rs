//! User service - Admin-facing user directory operations.
//!
//! Listing and lookups enrich each user who owns a store with that
//! store's derived average rating, recomputed on every read.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    average_rating, OwnedStoreSummary, Password, Store, User, UserResponse, UserRole,
    UserWithStore,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::UserListQuery;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user by ID with owned-store enrichment
    async fn get_user(&self, id: Uuid) -> AppResult<UserWithStore>;

    /// Filtered, sorted, paginated user listing with owned-store
    /// enrichment; returns the page and the total match count
    async fn list_users(&self, query: &UserListQuery) -> AppResult<(Vec<UserWithStore>, u64)>;

    /// Admin user creation with an explicit role
    async fn create_user(
        &self,
        name: String,
        email: String,
        password: String,
        address: String,
        role: UserRole,
    ) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Attach owned-store summaries (with derived averages) to users
    async fn enrich(&self, users: Vec<User>) -> AppResult<Vec<UserWithStore>> {
        let user_ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let stores = self.uow.stores().find_by_owner_ids(&user_ids).await?;

        let store_ids: Vec<Uuid> = stores.iter().map(|s| s.id).collect();
        let ratings = self.uow.ratings().list_for_stores(&store_ids).await?;

        let mut values_by_store: HashMap<Uuid, Vec<i32>> = HashMap::new();
        for rating in &ratings {
            values_by_store
                .entry(rating.store_id)
                .or_default()
                .push(rating.value);
        }

        let stores_by_owner: HashMap<Uuid, &Store> = stores
            .iter()
            .filter_map(|s| s.owner_id.map(|owner| (owner, s)))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let store = stores_by_owner.get(&user.id).map(|store| {
                    let values = values_by_store.get(&store.id).map_or(&[][..], Vec::as_slice);
                    OwnedStoreSummary {
                        id: store.id,
                        name: store.name.clone(),
                        average_rating: average_rating(values),
                    }
                });
                UserWithStore {
                    user: UserResponse::from(user),
                    store,
                }
            })
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<UserWithStore> {
        let user = self
            .uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let mut enriched = self.enrich(vec![user]).await?;
        enriched.pop().ok_or(AppError::NotFound("User"))
    }

    async fn list_users(&self, query: &UserListQuery) -> AppResult<(Vec<UserWithStore>, u64)> {
        let (users, total) = self.uow.users().list(query).await?;
        let enriched = self.enrich(users).await?;
        Ok((enriched, total))
    }

    async fn create_user(
        &self,
        name: String,
        email: String,
        password: String,
        address: String,
        role: UserRole,
    ) -> AppResult<User> {
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow
            .users()
            .create(name, email, password_hash, address, role)
            .await
    }
}
