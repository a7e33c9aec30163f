//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and manages the one
//! cross-aggregate transaction this system needs: assigning a store
//! to an owner, which promotes the owner's role and inserts the
//! store row atomically.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::user as user_entity;
use super::repositories::{
    map_store_insert_err, new_store_model, RatingRepository, RatingStore, StoreDirectory,
    StoreRepository, UserDirectory, UserRepository,
};
use crate::domain::{Store, UserRole};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the generic `transaction` method makes this trait not
/// mockable directly. For testing, mock at the repository level.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get store repository
    fn stores(&self) -> Arc<dyn StoreRepository>;

    /// Get rating repository
    fn ratings(&self) -> Arc<dyn RatingRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on
    /// error. ReadCommitted isolation; the uniqueness constraints
    /// involved do the heavy lifting.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    /// Get store repository for this transaction
    pub fn stores(&self) -> TxStoreRepository<'_> {
        TxStoreRepository { txn: self.txn }
    }
}

/// Transaction-aware user repository (role changes only; everything
/// else happens outside transactions)
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxUserRepository<'_> {
    /// Set the user's role
    pub async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        let user = user_entity::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let mut active: user_entity::ActiveModel = user.into();
        active.role = Set(role.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }
}

/// Transaction-aware store repository
pub struct TxStoreRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxStoreRepository<'_> {
    /// Insert a store row, optionally bound to an owner
    pub async fn create(
        &self,
        name: String,
        email: String,
        address: String,
        owner_id: Option<Uuid>,
    ) -> AppResult<Store> {
        let model = new_store_model(name, email, address, owner_id)
            .insert(self.txn)
            .await
            .map_err(map_store_insert_err)?;

        Ok(Store::from(model))
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserDirectory>,
    store_repo: Arc<StoreDirectory>,
    rating_repo: Arc<RatingStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserDirectory::new(db.clone()));
        let store_repo = Arc::new(StoreDirectory::new(db.clone()));
        let rating_repo = Arc::new(RatingStore::new(db.clone()));
        Self {
            db,
            user_repo,
            store_repo,
            rating_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn stores(&self) -> Arc<dyn StoreRepository> {
        self.store_repo.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.rating_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
