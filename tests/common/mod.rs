//! Shared test support: a UnitOfWork wrapping mock repositories and
//! fixture builders.

// Not every test binary uses every helper
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use store_ratings::domain::{Rating, Store, User, UserRole};
use store_ratings::errors::{AppError, AppResult};
use store_ratings::infra::{
    MockRatingRepository, MockStoreRepository, MockUserRepository, RatingRepository,
    StoreRepository, TransactionContext, UnitOfWork, UserRepository,
};

/// Test mock for UnitOfWork that wraps mock repositories
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    stores: Arc<MockStoreRepository>,
    ratings: Arc<MockRatingRepository>,
}

impl TestUnitOfWork {
    pub fn new(
        users: MockUserRepository,
        stores: MockStoreRepository,
        ratings: MockRatingRepository,
    ) -> Self {
        Self {
            users: Arc::new(users),
            stores: Arc::new(stores),
            ratings: Arc::new(ratings),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn stores(&self) -> Arc<dyn StoreRepository> {
        self.stores.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.ratings.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn test_user(id: Uuid, role: UserRole) -> User {
    User {
        id,
        name: "Test User Account".to_string(),
        email: format!("user-{}@example.com", id),
        password_hash: "hashed".to_string(),
        address: "1 Test Street".to_string(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_store(id: Uuid, owner_id: Option<Uuid>) -> Store {
    Store {
        id,
        name: "Test Store".to_string(),
        email: format!("store-{}@example.com", id),
        address: "2 Market Street".to_string(),
        owner_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_rating(user_id: Uuid, store_id: Uuid, value: i32) -> Rating {
    Rating {
        id: Uuid::new_v4(),
        user_id,
        store_id,
        value,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
