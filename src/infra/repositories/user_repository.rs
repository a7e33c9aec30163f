//! User repository with typed search, sort and pagination.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::{SortOrder, UserListQuery, UserSortField};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find several users by ID (unordered)
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user with an already-hashed password
    async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        address: String,
        role: UserRole,
    ) -> AppResult<User>;

    /// Replace the stored password digest
    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()>;

    /// Set the user's role
    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<()>;

    /// Filtered, sorted, paginated listing; returns the page and the
    /// total match count
    async fn list(&self, query: &UserListQuery) -> AppResult<(Vec<User>, u64)>;

    /// Count all users
    async fn count(&self) -> AppResult<u64>;
}

/// Case-insensitive substring condition on a user column
fn contains_ci(column: user::Column, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::col((UserEntity, column)).ilike(format!("%{}%", needle))
}

fn sort_column(field: UserSortField) -> user::Column {
    match field {
        UserSortField::Name => user::Column::Name,
        UserSortField::Email => user::Column::Email,
        UserSortField::Address => user::Column::Address,
        UserSortField::Role => user::Column::Role,
        UserSortField::CreatedAt => user::Column::CreatedAt,
    }
}

/// Concrete implementation of UserRepository
pub struct UserDirectory {
    db: DatabaseConnection,
}

impl UserDirectory {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserDirectory {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        address: String,
        role: UserRole,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            address: Set(address),
            role: Set(role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            // The unique index on email is the final arbiter between
            // racing signups
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::conflict("Email already registered")
                }
                _ => AppError::from(e),
            }
        })?;

        Ok(User::from(model))
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let mut active: ActiveModel = user.into();
        active.role = Set(role.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn list(&self, query: &UserListQuery) -> AppResult<(Vec<User>, u64)> {
        let mut condition = Condition::all();

        if let Some(search) = query.search.as_deref() {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(user::Column::Name, search))
                    .add(contains_ci(user::Column::Email, search))
                    .add(contains_ci(user::Column::Address, search)),
            );
        }
        if let Some(name) = query.name.as_deref() {
            condition = condition.add(contains_ci(user::Column::Name, name));
        }
        if let Some(email) = query.email.as_deref() {
            condition = condition.add(contains_ci(user::Column::Email, email));
        }
        if let Some(address) = query.address.as_deref() {
            condition = condition.add(contains_ci(user::Column::Address, address));
        }
        if let Some(role) = query.role {
            condition = condition.add(user::Column::Role.eq(role.as_str()));
        }

        let order = match query.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let pagination = query.pagination();
        let paginator = UserEntity::find()
            .filter(condition)
            .order_by(sort_column(query.sort_by), order)
            .paginate(&self.db, pagination.limit());

        let total = paginator.num_items().await?;
        // fetch_page is 0-indexed; pages past the end come back empty
        let models = paginator.fetch_page(pagination.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn count(&self) -> AppResult<u64> {
        UserEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
