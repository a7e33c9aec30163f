//! Store repository with typed search, sort and pagination.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::store::{self, ActiveModel, Entity as StoreEntity};
use crate::domain::Store;
use crate::errors::{AppError, AppResult};
use crate::types::{SortOrder, StoreListQuery, StoreSortField};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Store repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Find store by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Store>>;

    /// Find several stores by ID (unordered)
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Store>>;

    /// Find store by contact email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Store>>;

    /// Find the store owned by a user, if any
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Store>>;

    /// Find the stores owned by any of the given users
    async fn find_by_owner_ids(&self, owner_ids: &[Uuid]) -> AppResult<Vec<Store>>;

    /// Create an unowned store (ownership assignment goes through
    /// the unit of work so the owner's role promotion is atomic)
    async fn create(&self, name: String, email: String, address: String) -> AppResult<Store>;

    /// Filtered, sorted, paginated listing; returns the page and the
    /// total match count
    async fn list(&self, query: &StoreListQuery) -> AppResult<(Vec<Store>, u64)>;

    /// Count all stores
    async fn count(&self) -> AppResult<u64>;
}

/// Case-insensitive substring condition on a store column
fn contains_ci(column: store::Column, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::col((StoreEntity, column)).ilike(format!("%{}%", needle))
}

fn sort_column(field: StoreSortField) -> store::Column {
    match field {
        StoreSortField::Name => store::Column::Name,
        StoreSortField::Email => store::Column::Email,
        StoreSortField::Address => store::Column::Address,
        StoreSortField::CreatedAt => store::Column::CreatedAt,
    }
}

/// Build the active model for a new store row
pub(crate) fn new_store_model(
    name: String,
    email: String,
    address: String,
    owner_id: Option<Uuid>,
) -> ActiveModel {
    let now = chrono::Utc::now();
    ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        address: Set(address),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Map unique-index violations (email, owner) to a client conflict
pub(crate) fn map_store_insert_err(e: sea_orm::DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::conflict("Store email or owner already registered")
        }
        _ => AppError::from(e),
    }
}

/// Concrete implementation of StoreRepository
pub struct StoreDirectory {
    db: DatabaseConnection,
}

impl StoreDirectory {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoreRepository for StoreDirectory {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Store>> {
        let result = StoreEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Store::from))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Store>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = StoreEntity::find()
            .filter(store::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Store::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Store>> {
        let result = StoreEntity::find()
            .filter(store::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Store::from))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Store>> {
        let result = StoreEntity::find()
            .filter(store::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Store::from))
    }

    async fn find_by_owner_ids(&self, owner_ids: &[Uuid]) -> AppResult<Vec<Store>> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = StoreEntity::find()
            .filter(store::Column::OwnerId.is_in(owner_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Store::from).collect())
    }

    async fn create(&self, name: String, email: String, address: String) -> AppResult<Store> {
        let model = new_store_model(name, email, address, None)
            .insert(&self.db)
            .await
            .map_err(map_store_insert_err)?;

        Ok(Store::from(model))
    }

    async fn list(&self, query: &StoreListQuery) -> AppResult<(Vec<Store>, u64)> {
        let mut condition = Condition::all();

        if let Some(search) = query.search.as_deref() {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(store::Column::Name, search))
                    .add(contains_ci(store::Column::Address, search)),
            );
        }
        if let Some(name) = query.name.as_deref() {
            condition = condition.add(contains_ci(store::Column::Name, name));
        }
        if let Some(address) = query.address.as_deref() {
            condition = condition.add(contains_ci(store::Column::Address, address));
        }

        let order = match query.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let pagination = query.pagination();
        let paginator = StoreEntity::find()
            .filter(condition)
            .order_by(sort_column(query.sort_by), order)
            .paginate(&self.db, pagination.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(pagination.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Store::from).collect(), total))
    }

    async fn count(&self) -> AppResult<u64> {
        StoreEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
